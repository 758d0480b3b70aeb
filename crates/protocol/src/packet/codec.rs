use crate::function::FunctionSpec;
use crate::preamble::MAX_PAYLOAD_LEN;

use super::error::PacketError;
use super::filter::{FilterAction, PacketFilter};
use super::keys;
use super::params::ParameterMap;

const LENGTH_FIELD_LEN: usize = 4;

/// A single RPC call: a function name and its parameters.
///
/// On the wire every parameter is encoded as `name NUL length value NUL`
/// with a four-byte little-endian length that excludes the terminator. The
/// function name travels as the value of the `func` field, which is written
/// after all other parameters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Packet {
    function: String,
    params: ParameterMap,
}

impl Packet {
    /// Creates a packet calling `function` with `params`.
    #[must_use]
    pub fn new(function: impl Into<String>, params: ParameterMap) -> Self {
        Self {
            function: function.into(),
            params,
        }
    }

    /// Creates a packet calling a function from the function table.
    #[must_use]
    pub fn for_spec(spec: FunctionSpec, params: ParameterMap) -> Self {
        Self::new(spec.name(), params)
    }

    /// Function name carried by the packet.
    #[must_use]
    pub fn function_name(&self) -> &str {
        &self.function
    }

    /// Parameters carried by the packet.
    #[must_use]
    pub const fn params(&self) -> &ParameterMap {
        &self.params
    }

    /// Mutable access to the parameters.
    pub fn params_mut(&mut self) -> &mut ParameterMap {
        &mut self.params
    }

    /// Splits the packet into its function name and parameters.
    #[must_use]
    pub fn into_parts(self) -> (String, ParameterMap) {
        (self.function, self.params)
    }

    /// Encodes the payload that follows the preamble.
    pub fn encode_payload(&self) -> Result<Vec<u8>, PacketError> {
        let mut out = Vec::with_capacity(self.encoded_len());
        for (name, value) in self.params.iter().filter(|(name, _)| *name != keys::FUNC) {
            encode_field(&mut out, name, value)?;
        }
        encode_field(&mut out, keys::FUNC, self.function.as_bytes())?;

        if out.len() > MAX_PAYLOAD_LEN as usize {
            return Err(PacketError::OversizedPayload {
                len: out.len(),
                limit: MAX_PAYLOAD_LEN,
            });
        }
        Ok(out)
    }

    /// Decodes a payload, offering every parameter to `filter`.
    pub fn decode_payload(
        payload: &[u8],
        filter: &mut dyn PacketFilter,
    ) -> Result<Self, PacketError> {
        filter.reset();

        let mut function = None;
        let mut params = ParameterMap::new();
        let mut skipping_rest = false;
        let mut offset = 0;

        while offset < payload.len() {
            let (name, value, next) = decode_field(payload, offset)?;
            offset = next;

            if name == keys::FUNC {
                let name = std::str::from_utf8(value)
                    .map_err(|_| PacketError::InvalidFunctionName)?;
                function = Some(name.to_owned());
                continue;
            }
            if skipping_rest {
                continue;
            }

            match filter.filter(name, value) {
                FilterAction::Keep => {
                    params.insert(name, value);
                }
                FilterAction::Skip => {}
                FilterAction::SkipRest => skipping_rest = true,
            }
        }

        let function = function.ok_or(PacketError::MissingFunction)?;
        Ok(Self { function, params })
    }

    fn encoded_len(&self) -> usize {
        let field_len = |name: &str, value: &[u8]| name.len() + value.len() + LENGTH_FIELD_LEN + 2;
        self.params
            .iter()
            .map(|(name, value)| field_len(name, value))
            .sum::<usize>()
            + field_len(keys::FUNC, self.function.as_bytes())
    }
}

fn encode_field(out: &mut Vec<u8>, name: &str, value: &[u8]) -> Result<(), PacketError> {
    let len = u32::try_from(value.len())
        .ok()
        .filter(|len| *len <= MAX_PAYLOAD_LEN)
        .ok_or_else(|| PacketError::OversizedField {
            name: name.to_owned(),
            len: value.len(),
        })?;

    out.extend_from_slice(name.as_bytes());
    out.push(0);
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(value);
    out.push(0);
    Ok(())
}

fn decode_field(payload: &[u8], start: usize) -> Result<(&str, &[u8], usize), PacketError> {
    let rest = &payload[start..];
    let name_len = rest
        .iter()
        .position(|&byte| byte == 0)
        .ok_or(PacketError::TruncatedField {
            offset: start,
            part: "name",
        })?;
    let name = std::str::from_utf8(&rest[..name_len])
        .map_err(|_| PacketError::InvalidFieldName { offset: start })?;

    let rest = &rest[name_len + 1..];
    let Some((len_bytes, rest)) = rest.split_first_chunk::<LENGTH_FIELD_LEN>() else {
        return Err(PacketError::TruncatedField {
            offset: start,
            part: "length",
        });
    };
    let value_len = u32::from_le_bytes(*len_bytes) as usize;

    if rest.len() < value_len {
        return Err(PacketError::TruncatedField {
            offset: start,
            part: "value",
        });
    }
    let (value, rest) = rest.split_at(value_len);
    if rest.first() != Some(&0) {
        return Err(PacketError::MissingTerminator {
            name: name.to_owned(),
        });
    }

    let next = start + name_len + 1 + LENGTH_FIELD_LEN + value_len + 1;
    Ok((name, value, next))
}
