use core::fmt;

/// GNSS identifier used by NAV-SAT records and CFG-GNSS blocks
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GnssId {
    #[default]
    Gps = 0,
    Sbas = 1,
    Galileo = 2,
    Beidou = 3,
    Imes = 4,
    Qzss = 5,
    Glonass = 6,
}

/// Raw value that is not a known [`GnssId`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidGnssId(pub u8);

impl fmt::Display for InvalidGnssId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid GnssId value {}, must be in range [0, 6]", self.0)
    }
}

impl core::error::Error for InvalidGnssId {}

impl TryFrom<u8> for GnssId {
    type Error = InvalidGnssId;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(GnssId::Gps),
            1 => Ok(GnssId::Sbas),
            2 => Ok(GnssId::Galileo),
            3 => Ok(GnssId::Beidou),
            4 => Ok(GnssId::Imes),
            5 => Ok(GnssId::Qzss),
            6 => Ok(GnssId::Glonass),
            x => Err(InvalidGnssId(x)),
        }
    }
}

impl From<GnssId> for u8 {
    fn from(id: GnssId) -> u8 {
        id as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gnss_id() {
        for raw in 0..=6u8 {
            let id = GnssId::try_from(raw).unwrap();
            assert_eq!(u8::from(id), raw);
        }
        assert_eq!(GnssId::try_from(7), Err(InvalidGnssId(7)));
    }
}
