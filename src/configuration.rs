use std::fs::File;
use std::io::BufReader;

use serde::Deserialize;

use crate::configurationerror::ConfigurationError;
use crate::envelopesim::physicsrollingstock::Comfort;
use crate::ertms::etcs::nationalvalues::NationalValues;

const DEFAULT_TIME_STEP: f64 = 2.0;


#[derive(Deserialize)]
#[serde(default)]
struct SimulationSettingsJsonProp {
    time_step: f64,
    comfort: Comfort
}

impl Default for SimulationSettingsJsonProp {
    fn default() -> Self {
        SimulationSettingsJsonProp { time_step: DEFAULT_TIME_STEP, comfort: Comfort::default() }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ConfigurationJsonProp {
    national_values: NationalValues,
    simulation: SimulationSettingsJsonProp
}


/// Integration settings shared by every simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSettings {
    time_step: f64,
    comfort: Comfort
}

impl SimulationSettings {
    pub fn new(time_step: f64, comfort: Comfort) -> Result<SimulationSettings, ConfigurationError> {
        if !time_step.is_finite() || time_step <= 0.0 {
            return Err(ConfigurationError::InvalidValue {
                field: "simulation.time_step",
                value: time_step.to_string()
            });
        }
        Ok(SimulationSettings { time_step, comfort })
    }

    /// Integration time step, in seconds.
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn comfort(&self) -> Comfort {
        self.comfort
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings { time_step: DEFAULT_TIME_STEP, comfort: Comfort::default() }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Configuration {
    national_values: NationalValues,
    simulation: SimulationSettings
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration::default()
    }

    pub fn national_values(&self) -> &NationalValues {
        &self.national_values
    }

    pub fn simulation(&self) -> &SimulationSettings {
        &self.simulation
    }

    pub fn from_reader(file_path: String) -> Result<Configuration, ConfigurationError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        Configuration::from_json_prop(json_prop)
    }

    pub fn from_json_str(json: &str) -> Result<Configuration, ConfigurationError> {
        let json_prop: ConfigurationJsonProp = serde_json::from_str(json)?;
        Configuration::from_json_prop(json_prop)
    }

    fn from_json_prop(json_prop: ConfigurationJsonProp) -> Result<Configuration, ConfigurationError> {
        let simulation = SimulationSettings::new(json_prop.simulation.time_step, json_prop.simulation.comfort)?;
        Ok(Configuration { national_values: json_prop.national_values, simulation })
    }
}
