use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// IATA Airport Codes served by the search provider
// ============================================================================

macro_rules! airport_codes {
    ($($code:ident),+ $(,)?) => {
        /// Closed set of 3-letter IATA codes accepted for search and saved trips.
        #[allow(clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum AirportCode {
            $($code,)+
        }

        impl AirportCode {
            pub const ALL: &'static [AirportCode] = &[$(AirportCode::$code,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(AirportCode::$code => stringify!($code),)+
                }
            }
        }
    };
}

airport_codes!(
    ATL, PEK, LAX, DXB, HND, ORD, LHR, PVG, CDG, DFW,
    CAN, AMS, FRA, IST, DEL, CGK, SIN, ICN, DEN, BKK,
    SFO, LAS, CLT, MIA, KUL, SEA, MUC, EWR, MAD, HKG,
    MCO, PHX, IAH, SYD, MEL, GRU, YYZ, LGW, BCN, MAN,
    BOM, CPT, JNB, NBO, LIM, BOG, MEX, SCL, EZE, GIG,
    FCO, ZRH, VIE, DUB, CPH, OSL, ARN, HEL, LIS, ATH,
    DOH, AKL, NRT,
);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown airport code: {0}")]
pub struct UnknownAirportCode(pub String);

impl FromStr for AirportCode {
    type Err = UnknownAirportCode;

    // Case-sensitive: "cdg" is not a served airport.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AirportCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownAirportCode(s.to_string()))
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
