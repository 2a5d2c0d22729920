//! Battery bank sizing.
//!
//! The required capacity is the energy drawn during the backup window divided by the part of
//! the bank voltage that may actually be used, which depends on the depth of discharge of the
//! chemistry.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    prelude::*,
    quantity::{charge::AmpHours, power::Watts, ratios::Percentage, time::Hours, voltage::Volts},
};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum Chemistry {
    #[default]
    Lithium,

    #[serde(rename = "Lead-Acid")]
    LeadAcid,

    #[serde(rename = "AGM")]
    Agm,

    Gel,
}

impl Chemistry {
    #[cfg(test)]
    pub const ALL: [Self; 4] = [Self::Lithium, Self::LeadAcid, Self::Agm, Self::Gel];

    /// Usable share of the nominal capacity.
    pub const fn depth_of_discharge(self) -> Percentage {
        match self {
            Self::Lithium => Percentage(95),
            Self::LeadAcid | Self::Agm | Self::Gel => Percentage(50),
        }
    }
}

impl Display for Chemistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Lithium => "Lithium",
            Self::LeadAcid => "Lead-Acid",
            Self::Agm => "AGM",
            Self::Gel => "Gel",
        })
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SystemVoltage {
    #[default]
    #[serde(rename = "12")]
    V12,

    #[serde(rename = "24")]
    V24,

    #[serde(rename = "48")]
    V48,
}

impl SystemVoltage {
    pub const ALL: [Self; 3] = [Self::V12, Self::V24, Self::V48];

    pub const fn nominal(self) -> u16 {
        match self {
            Self::V12 => 12,
            Self::V24 => 24,
            Self::V48 => 48,
        }
    }
}

impl From<SystemVoltage> for Volts {
    fn from(voltage: SystemVoltage) -> Self {
        Self(f64::from(voltage.nominal()))
    }
}

impl Display for SystemVoltage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} V", self.nominal())
    }
}

impl FromStr for SystemVoltage {
    type Err = Error;

    /// Accepts `12`, `24` or `48`, with an optional `V` suffix.
    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim();
        let digits = value.strip_suffix(['V', 'v']).unwrap_or(value).trim_end();
        let nominal = digits
            .parse::<u16>()
            .with_context(|| format!("invalid system voltage: `{value}`"))?;
        Self::ALL
            .into_iter()
            .find(|voltage| voltage.nominal() == nominal)
            .with_context(|| format!("unsupported system voltage: {nominal} V"))
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Builder)]
pub struct BatteryCalculationInput {
    pub load: Watts,
    pub backup: Hours,
    pub voltage: SystemVoltage,
    pub chemistry: Chemistry,
}

impl BatteryCalculationInput {
    pub fn compute(&self) -> BatteryCalculationResult {
        compute(self.load, self.backup, self.voltage, self.chemistry)
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BatteryCalculationResult {
    /// Required bank capacity, rounded up to whole amp-hours.
    pub capacity: AmpHours,

    pub depth_of_discharge: Percentage,
    pub voltage: SystemVoltage,
}

/// Size the battery bank.
pub fn compute(
    load: Watts,
    backup: Hours,
    voltage: SystemVoltage,
    chemistry: Chemistry,
) -> BatteryCalculationResult {
    let depth_of_discharge = chemistry.depth_of_discharge();
    let usable_voltage = Volts::from(voltage) * depth_of_discharge.to_ratio();
    let capacity = (load * backup / usable_voltage).round_up();
    BatteryCalculationResult { capacity, depth_of_discharge, voltage }
}

/// Raw calculator input as it is typed in.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatteryForm {
    pub load: String,
    pub hours: String,
    pub voltage: String,
    pub chemistry: Chemistry,
}

impl Default for BatteryForm {
    fn default() -> Self {
        Self {
            load: String::new(),
            hours: String::new(),
            voltage: SystemVoltage::V12.nominal().to_string(),
            chemistry: Chemistry::Lithium,
        }
    }
}

impl BatteryForm {
    /// Parse the form, or [`None`] while any of the numeric fields is still missing, malformed,
    /// zero or negative, or while they are too extreme to give a whole positive capacity.
    pub fn parse(&self) -> Option<BatteryCalculationInput> {
        let input = self.try_parse();
        if input.is_none() {
            debug!(
                load = %self.load,
                hours = %self.hours,
                voltage = %self.voltage,
                "not ready yet"
            );
        }
        input
    }

    fn try_parse(&self) -> Option<BatteryCalculationInput> {
        let load = self.load.trim().parse::<Watts>().ok().filter(|load| load.is_positive())?;
        let backup = self.hours.trim().parse::<Hours>().ok().filter(|hours| hours.is_positive())?;
        let voltage = self.voltage.parse::<SystemVoltage>().ok()?;
        let input = BatteryCalculationInput::builder()
            .load(load)
            .backup(backup)
            .voltage(voltage)
            .chemistry(self.chemistry)
            .build();
        input.compute().capacity.is_positive().then_some(input)
    }
}
