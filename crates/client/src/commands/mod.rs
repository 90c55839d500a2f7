//! Subcommands. Each one prints to stdout in the selected format.

mod check;
mod damage;
mod derive;
mod list;
mod roll;

pub use check::Check;
pub use damage::Damage;
pub use derive::Derive;
pub use list::List;
pub use roll::Roll;

use anyhow::Result;
use serde_json::Value;

use storm_core::{ItemId, WeaponRef};

/// A weapon argument: a position for creature weapons, an item id otherwise.
pub(crate) fn parse_weapon_ref(raw: &str) -> WeaponRef {
    match raw.trim().parse::<usize>() {
        Ok(index) => WeaponRef::Index(index),
        Err(_) => WeaponRef::Id(ItemId::from(raw.trim())),
    }
}

pub(crate) fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weapon_refs_by_index_or_id() {
        assert_eq!(parse_weapon_ref("0"), WeaponRef::Index(0));
        assert_eq!(parse_weapon_ref(" 2 "), WeaponRef::Index(2));
        assert_eq!(
            parse_weapon_ref("stormbringer"),
            WeaponRef::Id(ItemId::from("stormbringer"))
        );
    }
}
