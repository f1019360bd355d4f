//! Enumerated codes carried by the basic information 2 header (H2).
//!
//! Codes are read as plain integers. A code outside the documented range is kept
//! as `Unknown(code)` so that reading never fails on it and writing reproduces it.

/// Target class (H2 field 18).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetClass {
    NoLrr,
    PassiveLrr,
    PassiveLrrLunar,
    SyncTransponder,
    AsyncTransponder,
    Unknown(i32),
}

impl TargetClass {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => TargetClass::NoLrr,
            1 => TargetClass::PassiveLrr,
            2 => TargetClass::PassiveLrrLunar,
            3 => TargetClass::SyncTransponder,
            4 => TargetClass::AsyncTransponder,
            other => TargetClass::Unknown(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            TargetClass::NoLrr => 0,
            TargetClass::PassiveLrr => 1,
            TargetClass::PassiveLrrLunar => 2,
            TargetClass::SyncTransponder => 3,
            TargetClass::AsyncTransponder => 4,
            TargetClass::Unknown(code) => code,
        }
    }

    /// Lunar reflectors and transponders cannot be ranged from a CPF prediction.
    pub fn is_rangeable(self) -> bool {
        !matches!(
            self,
            TargetClass::PassiveLrrLunar
                | TargetClass::SyncTransponder
                | TargetClass::AsyncTransponder
        )
    }
}

/// Reference frame of the position records (H2 field 19).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceFrame {
    GeocentricBodyFixed,
    GeocentricSpaceFixedTod,
    GeocentricSpaceFixedModJ2000,
    Unknown(i32),
}

impl ReferenceFrame {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => ReferenceFrame::GeocentricBodyFixed,
            1 => ReferenceFrame::GeocentricSpaceFixedTod,
            2 => ReferenceFrame::GeocentricSpaceFixedModJ2000,
            other => ReferenceFrame::Unknown(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            ReferenceFrame::GeocentricBodyFixed => 0,
            ReferenceFrame::GeocentricSpaceFixedTod => 1,
            ReferenceFrame::GeocentricSpaceFixedModJ2000 => 2,
            ReferenceFrame::Unknown(code) => code,
        }
    }
}

/// Rotation angle type (H2 field 20).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotAngleType {
    NotApplicable,
    LunarEulerAngles,
    RaDec,
    Unknown(i32),
}

impl RotAngleType {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => RotAngleType::NotApplicable,
            1 => RotAngleType::LunarEulerAngles,
            2 => RotAngleType::RaDec,
            other => RotAngleType::Unknown(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            RotAngleType::NotApplicable => 0,
            RotAngleType::LunarEulerAngles => 1,
            RotAngleType::RaDec => 2,
            RotAngleType::Unknown(code) => code,
        }
    }
}

/// Target dynamics classification (H2 field 23, version 2 only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetDynamics {
    #[default]
    Other,
    EarthOrbit,
    LunarOrbit,
    LunarSurface,
    MarsOrbit,
    MarsSurface,
    VenusOrbit,
    MercuryOrbit,
    AsteroidOrbit,
    AsteroidSurface,
    SolarTransferOrbit,
    Unknown(i32),
}

impl TargetDynamics {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => TargetDynamics::Other,
            1 => TargetDynamics::EarthOrbit,
            2 => TargetDynamics::LunarOrbit,
            3 => TargetDynamics::LunarSurface,
            4 => TargetDynamics::MarsOrbit,
            5 => TargetDynamics::MarsSurface,
            6 => TargetDynamics::VenusOrbit,
            7 => TargetDynamics::MercuryOrbit,
            8 => TargetDynamics::AsteroidOrbit,
            9 => TargetDynamics::AsteroidSurface,
            10 => TargetDynamics::SolarTransferOrbit,
            other => TargetDynamics::Unknown(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            TargetDynamics::Other => 0,
            TargetDynamics::EarthOrbit => 1,
            TargetDynamics::LunarOrbit => 2,
            TargetDynamics::LunarSurface => 3,
            TargetDynamics::MarsOrbit => 4,
            TargetDynamics::MarsSurface => 5,
            TargetDynamics::VenusOrbit => 6,
            TargetDynamics::MercuryOrbit => 7,
            TargetDynamics::AsteroidOrbit => 8,
            TargetDynamics::AsteroidSurface => 9,
            TargetDynamics::SolarTransferOrbit => 10,
            TargetDynamics::Unknown(code) => code,
        }
    }
}

#[cfg(test)]
mod codes_test {
    use super::*;

    #[test]
    fn test_known_codes_roundtrip() {
        for code in 0..=4 {
            assert_eq!(TargetClass::from_code(code).code(), code);
        }
        for code in 0..=2 {
            assert_eq!(ReferenceFrame::from_code(code).code(), code);
            assert_eq!(RotAngleType::from_code(code).code(), code);
        }
        for code in 0..=10 {
            assert_eq!(TargetDynamics::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_unknown_codes_are_preserved() {
        assert_eq!(TargetClass::from_code(7), TargetClass::Unknown(7));
        assert_eq!(TargetClass::Unknown(7).code(), 7);
        assert_eq!(ReferenceFrame::from_code(-1), ReferenceFrame::Unknown(-1));
        assert_eq!(RotAngleType::from_code(3).code(), 3);
        assert_eq!(TargetDynamics::from_code(11), TargetDynamics::Unknown(11));
    }

    #[test]
    fn test_rangeable() {
        assert!(TargetClass::NoLrr.is_rangeable());
        assert!(TargetClass::PassiveLrr.is_rangeable());
        assert!(TargetClass::Unknown(9).is_rangeable());
        assert!(!TargetClass::PassiveLrrLunar.is_rangeable());
        assert!(!TargetClass::SyncTransponder.is_rangeable());
        assert!(!TargetClass::AsyncTransponder.is_rangeable());
    }
}
