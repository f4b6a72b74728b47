use std::fmt;

/// InfluxDB measurement each line is written to.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Measurement {
    /// Hourly active energy consumption
    Consumption,
    /// Maximum demanded power per tariff period
    MaxPower,
}

impl Measurement {
    /// Name of the single field carried by lines of this measurement.
    pub fn field(&self) -> &'static str {
        match self {
            Measurement::Consumption => "consumption",
            Measurement::MaxPower => "max_power",
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Measurement::Consumption => write!(f, "datadis_consumption"),
            Measurement::MaxPower => write!(f, "datadis_power"),
        }
    }
}

/// Tariff time band of a consumption reading.
///
/// Labels outside the three known bands are kept verbatim.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Period {
    /// PUNTA (peak)
    Peak,
    /// LLANO (mid)
    Flat,
    /// VALLE (off-peak)
    Valley,
    Other(String),
}

impl Period {
    pub fn from_label(label: &str) -> Self {
        match label {
            "PUNTA" => Period::Peak,
            "LLANO" => Period::Flat,
            "VALLE" => Period::Valley,
            other => Period::Other(other.to_string()),
        }
    }
}

/// Writes the numeric code stored in the `period` tag.
impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Period::Peak => write!(f, "1"),
            Period::Flat => write!(f, "2"),
            Period::Valley => write!(f, "3"),
            Period::Other(label) => write!(f, "{}", label),
        }
    }
}

/// Distribution companies known to Datadis, keyed by their numeric code.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Distributor {
    Viesgo,
    EDistribucion,
    ERedes,
    Aseme,
    Ufd,
    Eosa,
    Cide,
    Ide,
    Other(String),
}

impl Distributor {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "1" => Distributor::Viesgo,
            "2" => Distributor::EDistribucion,
            "3" => Distributor::ERedes,
            "4" => Distributor::Aseme,
            "5" => Distributor::Ufd,
            "6" => Distributor::Eosa,
            "7" => Distributor::Cide,
            "8" => Distributor::Ide,
            other => Distributor::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Distributor::Viesgo => "1",
            Distributor::EDistribucion => "2",
            Distributor::ERedes => "3",
            Distributor::Aseme => "4",
            Distributor::Ufd => "5",
            Distributor::Eosa => "6",
            Distributor::Cide => "7",
            Distributor::Ide => "8",
            Distributor::Other(code) => code,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Distributor::Viesgo => "Viesgo",
            Distributor::EDistribucion => "E-distribución",
            Distributor::ERedes => "E-redes",
            Distributor::Aseme => "ASEME",
            Distributor::Ufd => "UFD",
            Distributor::Eosa => "EOSA",
            Distributor::Cide => "CIDE",
            Distributor::Ide => "IDE",
            Distributor::Other(_) => "unknown",
        }
    }
}

impl fmt::Display for Distributor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}
