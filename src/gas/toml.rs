use alloc::string::String;

use miden_crypto::StarkField;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Gas, GasFees, GasSettings};
use crate::{DEFAULT_GAS_LIMIT, DEFAULT_TEARDOWN_GAS_LIMIT, Felt, GasSettingsError};

// GAS SETTINGS TOML
// ================================================================================================

impl GasSettings {
    /// Deserializes gas settings from a TOML document.
    ///
    /// Tables and keys missing from the document take their protocol default values, so an empty
    /// document yields [GasSettings::default].
    ///
    /// # Example
    ///
    /// ```toml
    /// inclusion_fee = 5
    ///
    /// [gas_limits]
    /// da_gas = 1000000
    /// l2_gas = 2000000
    ///
    /// [max_fees_per_gas]
    /// fee_per_da_gas = 2
    /// fee_per_l2_gas = 3
    /// ```
    ///
    /// # Errors
    /// Returns an error if:
    /// - The document is not valid TOML or does not describe gas settings.
    /// - The teardown gas limits exceed the total gas limits in any dimension.
    pub fn from_toml(toml_string: &str) -> Result<Self, GasSettingsError> {
        let settings: GasSettings =
            ::toml::from_str(toml_string).map_err(GasSettingsError::TomlDeserializationError)?;

        settings.validate()?;
        Ok(settings)
    }

    /// Serializes the gas settings into a TOML string.
    pub fn as_toml(&self) -> Result<String, GasSettingsError> {
        let toml = ::toml::to_string(self).map_err(GasSettingsError::TomlSerializationError)?;
        Ok(toml)
    }

    fn validate(&self) -> Result<(), GasSettingsError> {
        if self.teardown_gas_limits.gt_any(&self.gas_limits) {
            return Err(GasSettingsError::TeardownExceedsLimits {
                total: format!("{:?}", self.gas_limits),
                teardown: format!("{:?}", self.teardown_gas_limits),
            });
        }
        Ok(())
    }
}

/// The TOML representation of [GasSettings], with field elements as plain integers.
#[derive(Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct GasSettingsRepr {
    inclusion_fee: u64,
    gas_limits: GasRepr<DEFAULT_GAS_LIMIT>,
    teardown_gas_limits: GasRepr<DEFAULT_TEARDOWN_GAS_LIMIT>,
    max_fees_per_gas: GasFeesRepr,
}

impl Default for GasSettingsRepr {
    fn default() -> Self {
        GasSettingsRepr::from(&GasSettings::default())
    }
}

impl From<&GasSettings> for GasSettingsRepr {
    fn from(settings: &GasSettings) -> Self {
        Self {
            inclusion_fee: settings.inclusion_fee.as_int(),
            gas_limits: GasRepr::from(settings.gas_limits),
            teardown_gas_limits: GasRepr::from(settings.teardown_gas_limits),
            max_fees_per_gas: GasFeesRepr::from(&settings.max_fees_per_gas),
        }
    }
}

/// A gas table in which a missing dimension takes `DEFAULT`.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct GasRepr<const DEFAULT: u32> {
    #[serde(default = "GasRepr::<DEFAULT>::default_da_gas")]
    da_gas: u32,
    #[serde(default = "GasRepr::<DEFAULT>::default_l2_gas")]
    l2_gas: u32,
}

// serde's derive does not support container-level `default` on const-generic types, so each field
// defers to the container's `Default` instead.
impl<const DEFAULT: u32> GasRepr<DEFAULT> {
    fn default_da_gas() -> u32 {
        Self::default().da_gas
    }

    fn default_l2_gas() -> u32 {
        Self::default().l2_gas
    }
}

impl<const DEFAULT: u32> Default for GasRepr<DEFAULT> {
    fn default() -> Self {
        Self::from(Gas::uniform(DEFAULT))
    }
}

impl<const DEFAULT: u32> From<Gas> for GasRepr<DEFAULT> {
    fn from(gas: Gas) -> Self {
        Self { da_gas: gas.da_gas(), l2_gas: gas.l2_gas() }
    }
}

impl<const DEFAULT: u32> From<GasRepr<DEFAULT>> for Gas {
    fn from(repr: GasRepr<DEFAULT>) -> Self {
        Gas::new(repr.da_gas, repr.l2_gas)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct GasFeesRepr {
    fee_per_da_gas: u64,
    fee_per_l2_gas: u64,
}

impl Default for GasFeesRepr {
    fn default() -> Self {
        GasFeesRepr::from(&GasFees::default())
    }
}

impl From<&GasFees> for GasFeesRepr {
    fn from(fees: &GasFees) -> Self {
        Self {
            fee_per_da_gas: fees.fee_per_da_gas().as_int(),
            fee_per_l2_gas: fees.fee_per_l2_gas().as_int(),
        }
    }
}

impl Serialize for GasSettings {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        GasSettingsRepr::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GasSettings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = GasSettingsRepr::deserialize(deserializer)?;
        let fees = GasFees::new(
            felt_from_u64::<D>(repr.max_fees_per_gas.fee_per_da_gas)?,
            felt_from_u64::<D>(repr.max_fees_per_gas.fee_per_l2_gas)?,
        );

        Ok(GasSettings::new(
            Gas::from(repr.gas_limits),
            Gas::from(repr.teardown_gas_limits),
            fees,
            felt_from_u64::<D>(repr.inclusion_fee)?,
        ))
    }
}

fn felt_from_u64<'de, D: Deserializer<'de>>(value: u64) -> Result<Felt, D::Error> {
    if value >= Felt::MODULUS {
        return Err(serde::de::Error::custom(format!(
            "{value} is not a canonical field element"
        )));
    }
    Ok(Felt::new(value))
}

// TESTS
// ================================================================================================
