use crate::{
    Felt, FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

/// An affine point on the protocol's embedded curve.
///
/// The codec layer treats points as opaque values; no curve arithmetic is performed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    x: Felt,
    y: Felt,
    is_infinite: bool,
}

impl Point {
    pub fn new(x: Felt, y: Felt, is_infinite: bool) -> Self {
        Self { x, y, is_infinite }
    }

    /// Returns the point at infinity.
    pub fn infinity() -> Self {
        Self { x: ZERO, y: ZERO, is_infinite: true }
    }

    pub fn x(&self) -> Felt {
        self.x
    }

    pub fn y(&self) -> Felt {
        self.y
    }

    pub fn is_infinite(&self) -> bool {
        self.is_infinite
    }

    pub fn is_zero(&self) -> bool {
        self.x == ZERO && self.y == ZERO
    }
}

impl Empty for Point {
    fn empty() -> Self {
        Self { x: ZERO, y: ZERO, is_infinite: false }
    }

    fn is_empty(&self) -> bool {
        self.is_zero() && !self.is_infinite
    }
}

impl FieldSerializable for Point {
    const NUM_FIELDS: usize = crate::POINT_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write_felt(self.x);
        target.write_felt(self.y);
        target.write_bool(self.is_infinite);
    }
}

impl FieldDeserializable for Point {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            x: source.read_felt()?,
            y: source.read_felt()?,
            is_infinite: source.read_bool()?,
        })
    }
}

impl Serializable for Point {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.x.write_into(target);
        self.y.write_into(target);
        target.write_bool(self.is_infinite);
    }
}

impl Deserializable for Point {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let x = Felt::read_from(source)?;
        let y = Felt::read_from(source)?;
        let is_infinite = source.read_bool()?;
        Ok(Self { x, y, is_infinite })
    }
}
