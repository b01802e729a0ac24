use super::Scoped;
use crate::{
    Felt, FieldDeserializationError, ZERO,
    codec::{Empty, FieldDeserializable, FieldReader, FieldSerializable, FieldWriter},
    types::{AztecAddress, Point},
    utils::serde::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable},
};

// KEY VALIDATION REQUEST
// ================================================================================================

/// A request to check that `sk_app` is the app-siloed secret key derived from the master secret
/// key behind `pk_m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyValidationRequest {
    pk_m: Point,
    sk_app: Felt,
}

impl KeyValidationRequest {
    pub fn new(pk_m: Point, sk_app: Felt) -> Self {
        Self { pk_m, sk_app }
    }

    pub fn pk_m(&self) -> Point {
        self.pk_m
    }

    pub fn sk_app(&self) -> Felt {
        self.sk_app
    }
}

impl Empty for KeyValidationRequest {
    fn empty() -> Self {
        Self { pk_m: Point::empty(), sk_app: ZERO }
    }

    fn is_empty(&self) -> bool {
        self.pk_m.is_empty() && self.sk_app == ZERO
    }
}

impl FieldSerializable for KeyValidationRequest {
    const NUM_FIELDS: usize = crate::KEY_VALIDATION_REQUEST_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.pk_m);
        target.write_felt(self.sk_app);
    }
}

impl FieldDeserializable for KeyValidationRequest {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            pk_m: source.read()?,
            sk_app: source.read_felt()?,
        })
    }
}

impl Serializable for KeyValidationRequest {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.pk_m.write_into(target);
        self.sk_app.write_into(target);
    }
}

impl Deserializable for KeyValidationRequest {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let pk_m = Point::read_from(source)?;
        let sk_app = Felt::read_from(source)?;
        Ok(Self { pk_m, sk_app })
    }
}

// KEY VALIDATION REQUEST AND GENERATOR
// ================================================================================================

/// A [KeyValidationRequest] together with the generator index the app secret key was derived
/// with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyValidationRequestAndGenerator {
    request: KeyValidationRequest,
    sk_app_generator: Felt,
}

impl KeyValidationRequestAndGenerator {
    pub fn new(request: KeyValidationRequest, sk_app_generator: Felt) -> Self {
        Self { request, sk_app_generator }
    }

    pub fn request(&self) -> &KeyValidationRequest {
        &self.request
    }

    pub fn sk_app_generator(&self) -> Felt {
        self.sk_app_generator
    }

    pub fn scope(self, contract_address: AztecAddress) -> Scoped<Self> {
        Scoped::new(self, contract_address)
    }
}

impl Empty for KeyValidationRequestAndGenerator {
    fn empty() -> Self {
        Self {
            request: KeyValidationRequest::empty(),
            sk_app_generator: ZERO,
        }
    }

    fn is_empty(&self) -> bool {
        self.request.is_empty() && self.sk_app_generator == ZERO
    }
}

impl FieldSerializable for KeyValidationRequestAndGenerator {
    const NUM_FIELDS: usize = crate::KEY_VALIDATION_REQUEST_AND_GENERATOR_LENGTH;

    fn write_fields_into(&self, target: &mut FieldWriter) {
        target.write(&self.request);
        target.write_felt(self.sk_app_generator);
    }
}

impl FieldDeserializable for KeyValidationRequestAndGenerator {
    fn read_fields_from(source: &mut FieldReader<'_>) -> Result<Self, FieldDeserializationError> {
        Ok(Self {
            request: source.read()?,
            sk_app_generator: source.read_felt()?,
        })
    }
}

impl Serializable for KeyValidationRequestAndGenerator {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.request.write_into(target);
        self.sk_app_generator.write_into(target);
    }
}

impl Deserializable for KeyValidationRequestAndGenerator {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let request = KeyValidationRequest::read_from(source)?;
        let sk_app_generator = Felt::read_from(source)?;
        Ok(Self { request, sk_app_generator })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SCOPED_KEY_VALIDATION_REQUEST_AND_GENERATOR_LENGTH;

    #[test]
    fn scoped_request_layout() {
        let request =
            KeyValidationRequest::new(Point::new(Felt::new(1), Felt::new(2), false), Felt::new(3));
        let scoped = KeyValidationRequestAndGenerator::new(request, Felt::new(4))
            .scope(AztecAddress::from(Felt::new(5)));

        let fields = scoped.to_fields();
        assert_eq!(fields.len(), SCOPED_KEY_VALIDATION_REQUEST_AND_GENERATOR_LENGTH);
        assert_eq!(
            fields,
            vec![Felt::new(1), Felt::new(2), ZERO, Felt::new(3), Felt::new(4), Felt::new(5)]
        );
        let decoded =
            Scoped::<KeyValidationRequestAndGenerator>::read_from_fields(&fields).unwrap();
        assert_eq!(decoded, scoped);
    }

    #[test]
    fn infinite_point_is_not_empty() {
        let request = KeyValidationRequest::new(Point::infinity(), ZERO);
        assert!(!request.is_empty());
    }
}
