use alloc::{string::String, vec::Vec};

use thiserror::Error;

use crate::{
    entrypoint::{FeePaymentMethod, FunctionCall},
    gas::GasSettings,
    types::AztecAddress,
};

#[derive(Debug, Error)]
#[error("mock fee payment method failed: {0}")]
pub struct MockFeePaymentError(pub String);

/// A [FeePaymentMethod] returning preconfigured calls and fee payer, or a preconfigured failure.
#[derive(Debug, Clone, Default)]
pub struct MockFeePaymentMethod {
    calls: Vec<FunctionCall>,
    fee_payer: AztecAddress,
    failure: Option<String>,
}

impl MockFeePaymentMethod {
    pub fn new(fee_payer: AztecAddress, calls: Vec<FunctionCall>) -> Self {
        Self { calls, fee_payer, failure: None }
    }

    /// Returns a payment method which fails with `message` whenever it is queried.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), MockFeePaymentError> {
        match &self.failure {
            Some(message) => Err(MockFeePaymentError(message.clone())),
            None => Ok(()),
        }
    }
}

impl FeePaymentMethod for MockFeePaymentMethod {
    type Error = MockFeePaymentError;

    fn function_calls(
        &self,
        _gas_settings: &GasSettings,
    ) -> Result<Vec<FunctionCall>, Self::Error> {
        self.check()?;
        Ok(self.calls.clone())
    }

    fn fee_payer(&self, _gas_settings: &GasSettings) -> Result<AztecAddress, Self::Error> {
        self.check()?;
        Ok(self.fee_payer)
    }
}
