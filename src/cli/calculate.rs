use clap::Parser;

use crate::{
    battery::{BatteryForm, Chemistry},
    prelude::*,
    tables::build_calculation_table,
};

#[derive(Parser)]
pub struct CalculateArgs {
    /// Total load in watts.
    #[clap(long = "load-watts", default_value = "")]
    load: String,

    /// Hours of backup needed.
    #[clap(long = "backup-hours", default_value = "")]
    hours: String,

    /// Solar system operating voltage: 12, 24 or 48.
    #[clap(long = "system-voltage", default_value = "12")]
    voltage: String,

    #[clap(long, default_value = "lithium")]
    chemistry: Chemistry,
}

impl CalculateArgs {
    pub fn run(self) {
        let form = BatteryForm {
            load: self.load,
            hours: self.hours,
            voltage: self.voltage,
            chemistry: self.chemistry,
        };
        match form.parse() {
            Some(input) => {
                let result = input.compute();
                info!(capacity = %result.capacity, "calculated");
                println!("{}", build_calculation_table(&input, &result));
            }
            None => {
                warn!("enter a positive load, backup hours and a 12, 24 or 48 V system voltage");
            }
        }
    }
}
