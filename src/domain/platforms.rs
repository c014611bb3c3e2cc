// src/domain/platforms.rs

/// How a platform derives its sale price from our base price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeeModel {
    Percentage { rate: f64 },
    PercentagePlusFixed { rate: f64, fixed_fee: f64 },
}

impl FeeModel {
    /// Human-readable fee structure, e.g. "10%" or "8% + $2".
    pub fn describe(&self) -> String {
        match self {
            FeeModel::Percentage { rate } => format!("{}%", rate * 100.0),
            FeeModel::PercentagePlusFixed { rate, fixed_fee } => {
                format!("{}% + ${}", rate * 100.0, fixed_fee)
            }
        }
    }
}

/// One third-party resale marketplace. Fixed configuration, never
/// mutated at runtime.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Short code used as the key everywhere ("X", "Y", "Z").
    pub code: String,
    pub name: String,
    pub fee_model: FeeModel,
    /// Condition labels the platform accepts, in its own display order.
    pub conditions: Vec<String>,
}

/// Registry of supported platforms, looked up by code.
///
/// Built once at process start and passed explicitly to the engine
/// components, so tests can substitute alternate platform sets.
#[derive(Debug, Clone)]
pub struct PlatformCatalog {
    platforms: Vec<Platform>,
}

impl PlatformCatalog {
    pub fn new(platforms: Vec<Platform>) -> Self {
        Self { platforms }
    }

    /// The production platform set.
    pub fn standard() -> Self {
        Self::new(vec![
            Platform {
                code: "X".into(),
                name: "Platform X".into(),
                fee_model: FeeModel::Percentage { rate: 0.10 },
                conditions: vec!["New".into(), "Good".into(), "Scrap".into()],
            },
            Platform {
                code: "Y".into(),
                name: "Platform Y".into(),
                fee_model: FeeModel::PercentagePlusFixed {
                    rate: 0.08,
                    fixed_fee: 2.0,
                },
                conditions: vec![
                    "3 stars (Excellent)".into(),
                    "2 stars (Good)".into(),
                    "1 star (Usable)".into(),
                ],
            },
            Platform {
                code: "Z".into(),
                name: "Platform Z".into(),
                fee_model: FeeModel::Percentage { rate: 0.12 },
                conditions: vec!["New".into(), "As New".into(), "Good".into()],
            },
        ])
    }

    pub fn get(&self, code: &str) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.code == code)
    }

    /// Platform codes in declaration order.
    pub fn codes(&self) -> Vec<&str> {
        self.platforms.iter().map(|p| p.code.as_str()).collect()
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }
}
