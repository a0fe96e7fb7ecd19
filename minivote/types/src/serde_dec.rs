//! Serialize `U256` vote weights as decimal strings. The default serde impl
//! produces the `0x`-prefixed hex form, which is unreadable in CLI output and
//! doesn't match how tallies are quoted anywhere else in the app.

use {alloy_primitives::U256, serde::Serializer};

pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}
