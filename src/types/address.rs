use alloc::string::String;
use core::fmt;

use crate::{
    Felt, FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    utils::{
        bytes_to_hex_string, hex_to_bytes,
        serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
    },
};

// AZTEC ADDRESS
// ================================================================================================

/// The address of an L2 contract or account, represented by a single field element.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct AztecAddress(Felt);

impl AztecAddress {
    /// The zero address, which is never assigned to a contract.
    pub const ZERO: Self = Self(ZERO);

    pub const fn new(value: Felt) -> Self {
        Self(value)
    }

    pub fn to_field(&self) -> Felt {
        self.0
    }

    pub fn from_field(value: Felt) -> Self {
        Self(value)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == ZERO
    }
}

impl From<Felt> for AztecAddress {
    fn from(value: Felt) -> Self {
        Self(value)
    }
}

impl From<AztecAddress> for Felt {
    fn from(address: AztecAddress) -> Self {
        address.0
    }
}

impl fmt::Display for AztecAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0.as_int())
    }
}

impl fmt::Debug for AztecAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Empty for AztecAddress {
    fn empty() -> Self {
        Self::ZERO
    }

    fn is_empty(&self) -> bool {
        self.is_zero()
    }
}

impl FieldSerializable for AztecAddress {
    const NUM_FIELDS: usize = crate::AZTEC_ADDRESS_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_felt(self.0);
    }
}

impl FieldDeserializable for AztecAddress {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self(source.read_felt()?))
    }
}

impl Serializable for AztecAddress {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.0.write_into(target);
    }
}

impl Deserializable for AztecAddress {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        Ok(Self(Felt::read_from(source)?))
    }
}

// ETH ADDRESS
// ================================================================================================

/// The address of an L1 (Ethereum) account.
///
/// # Field layout
///
/// 160 bits do not fit into a single field element, so the address is split into five 32-bit
/// limbs, most significant limb first:
///
/// ```text
/// [bytes 0..4, bytes 4..8, bytes 8..12, bytes 12..16, bytes 16..20]
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct EthAddress([u8; 20]);

impl EthAddress {
    pub const ZERO: Self = Self([0; 20]);

    const NUM_LIMBS: usize = 5;

    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; 20]
    }

    /// Parses an address from a `0x`-prefixed string of 40 hex digits.
    pub fn from_hex(hex: &str) -> Result<Self, crate::utils::HexParseError> {
        hex_to_bytes::<20>(hex).map(Self)
    }

    /// Returns the `0x`-prefixed hex representation of the address.
    pub fn to_hex(&self) -> String {
        bytes_to_hex_string(self.0)
    }
}

impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Empty for EthAddress {
    fn empty() -> Self {
        Self::ZERO
    }

    fn is_empty(&self) -> bool {
        self.is_zero()
    }
}

impl FieldSerializable for EthAddress {
    const NUM_FIELDS: usize = crate::ETH_ADDRESS_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        for limb in self.0.chunks_exact(4) {
            target.write_u32(u32::from_be_bytes([limb[0], limb[1], limb[2], limb[3]]));
        }
    }
}

impl FieldDeserializable for EthAddress {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        let mut bytes = [0u8; 20];
        for i in 0..Self::NUM_LIMBS {
            let limb = source.read_u32()?;
            bytes[i * 4..(i + 1) * 4].copy_from_slice(&limb.to_be_bytes());
        }
        Ok(Self(bytes))
    }
}

impl Serializable for EthAddress {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_bytes(&self.0);
    }
}

impl Deserializable for EthAddress {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        Ok(Self(source.read_array()?))
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eth_address_limbs_are_big_endian() {
        let mut bytes = [0u8; 20];
        bytes[3] = 1;
        bytes[19] = 0xff;
        let address = EthAddress::new(bytes);

        assert_eq!(
            address.to_fields(),
            vec![Felt::new(1), ZERO, ZERO, ZERO, Felt::new(0xff)]
        );
        assert_eq!(EthAddress::read_from_fields(&address.to_fields()).unwrap(), address);
    }

    #[test]
    fn eth_address_hex_round_trip() {
        let hex = "0x00000000000000000000000000000000deadbeef";
        let address = EthAddress::from_hex(hex).unwrap();
        assert_eq!(address.to_hex(), hex);
        assert_eq!(EthAddress::read_from_bytes(&address.to_bytes()).unwrap(), address);
    }

    #[test]
    fn aztec_address_zero_is_empty() {
        assert!(AztecAddress::empty().is_zero());
        assert!(!AztecAddress::from(Felt::new(5)).is_empty());
    }
}
