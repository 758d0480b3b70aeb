use super::keys;

/// Decision taken by a [`PacketFilter`] for one incoming field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FilterAction {
    /// Keep the field.
    Keep,
    /// Drop this field only.
    Skip,
    /// Drop this field and every later field of the packet.
    SkipRest,
}

/// Caller-supplied hook that can drop fields from incoming packets.
///
/// The `func` field is never offered to the filter. [`PacketFilter::reset`]
/// runs before the first field of every packet.
pub trait PacketFilter {
    /// Clears per-packet state.
    fn reset(&mut self) {}

    /// Decides whether the field `name` is kept.
    fn filter(&mut self, name: &str, value: &[u8]) -> FilterAction;
}

/// Filter that keeps every field.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeepAll;

impl PacketFilter for KeepAll {
    fn filter(&mut self, _name: &str, _value: &[u8]) -> FilterAction {
        FilterAction::Keep
    }
}

impl<F> PacketFilter for F
where
    F: FnMut(&str, &[u8]) -> FilterAction,
{
    fn filter(&mut self, name: &str, value: &[u8]) -> FilterAction {
        self(name, value)
    }
}

/// Decides which incoming fields bypass charset transcoding.
pub trait FieldRule {
    /// Returns `true` when the bytes of `name` must be passed through untouched.
    fn skip_conversion(&mut self, name: &str) -> bool;
}

/// Rule that leaves file content fields untouched and converts everything else.
#[derive(Clone, Copy, Debug, Default)]
pub struct BinaryFieldRule;

impl BinaryFieldRule {
    const BINARY_FIELDS: [&'static str; 3] = [keys::DATA, keys::DATA2, keys::TOKEN];
}

impl FieldRule for BinaryFieldRule {
    fn skip_conversion(&mut self, name: &str) -> bool {
        Self::BINARY_FIELDS.contains(&name)
    }
}

impl<F> FieldRule for F
where
    F: FnMut(&str) -> bool,
{
    fn skip_conversion(&mut self, name: &str) -> bool {
        self(name)
    }
}
