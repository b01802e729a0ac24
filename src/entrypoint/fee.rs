use alloc::vec::Vec;
use core::{convert::Infallible, error::Error};

use super::FunctionCall;
use crate::{gas::GasSettings, types::AztecAddress};

// FEE PAYMENT METHOD
// ================================================================================================

/// A way of paying the fee of a transaction.
///
/// A payment method decides which account pays the fee and which calls, if any, have to be made
/// in the fee payment phase of the transaction for the payment to happen.
pub trait FeePaymentMethod {
    type Error: Error + Send + Sync + 'static;

    /// Returns the calls which pay the fee for a transaction with the given gas settings.
    fn function_calls(&self, gas_settings: &GasSettings) -> Result<Vec<FunctionCall>, Self::Error>;

    /// Returns the address of the account paying the fee, or the zero address if the method does
    /// not resolve one.
    fn fee_payer(&self, gas_settings: &GasSettings) -> Result<AztecAddress, Self::Error>;
}

// FEE OPTIONS
// ================================================================================================

/// A fee payment method together with the gas settings the fee is computed from.
#[derive(Debug, Clone)]
pub struct FeeOptions<M> {
    payment_method: M,
    gas_settings: GasSettings,
}

impl<M: FeePaymentMethod> FeeOptions<M> {
    pub fn new(payment_method: M, gas_settings: GasSettings) -> Self {
        Self { payment_method, gas_settings }
    }

    pub fn payment_method(&self) -> &M {
        &self.payment_method
    }

    pub fn gas_settings(&self) -> &GasSettings {
        &self.gas_settings
    }
}

// NATIVE FEE PAYMENT METHOD
// ================================================================================================

/// Pays the fee from the fee juice balance of an account, without any extra calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeFeePaymentMethod {
    payer: AztecAddress,
}

impl NativeFeePaymentMethod {
    pub fn new(payer: AztecAddress) -> Self {
        Self { payer }
    }
}

impl FeePaymentMethod for NativeFeePaymentMethod {
    type Error = Infallible;

    fn function_calls(&self, _gas_settings: &GasSettings) -> Result<Vec<FunctionCall>, Infallible> {
        Ok(Vec::new())
    }

    fn fee_payer(&self, _gas_settings: &GasSettings) -> Result<AztecAddress, Infallible> {
        Ok(self.payer)
    }
}
