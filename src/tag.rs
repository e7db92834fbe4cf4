use std::fmt;

/// Generate a 4-byte script or feature tag from a byte string
///
/// Example:
///
/// ```
/// use textshaper::tag;
/// assert_eq!(tag!(b"arab"), 0x61726162);
/// ```
#[macro_export]
macro_rules! tag {
    ($w:expr) => {
        $crate::tag::from_bytes(*$w)
    };
}

#[derive(PartialEq, Eq, Clone, Copy)]
pub struct DisplayTag(pub u32);

pub const fn from_bytes(chars: [u8; 4]) -> u32 {
    ((chars[3] as u32) << 0)
        | ((chars[2] as u32) << 8)
        | ((chars[1] as u32) << 16)
        | ((chars[0] as u32) << 24)
}

impl fmt::Display for DisplayTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.0;
        let mut s = String::with_capacity(4);
        s.push(char::from((tag >> 24) as u8));
        s.push(char::from(((tag >> 16) & 255) as u8));
        s.push(char::from(((tag >> 8) & 255) as u8));
        s.push(char::from((tag & 255) as u8));
        if s.chars().any(|c| !c.is_ascii() || c.is_ascii_control()) {
            write!(f, "0x{:08x}", tag)
        } else {
            s.fmt(f)
        }
    }
}

impl fmt::Debug for DisplayTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_string().fmt(f)
    }
}

// Script tags
pub const ARAB: u32 = tag!(b"arab");
pub const BENG: u32 = tag!(b"beng");
pub const CYRL: u32 = tag!(b"cyrl");
pub const DEVA: u32 = tag!(b"deva");
pub const GREK: u32 = tag!(b"grek");
pub const GUJR: u32 = tag!(b"gujr");
pub const GURU: u32 = tag!(b"guru");
pub const HANG: u32 = tag!(b"hang");
pub const HEBR: u32 = tag!(b"hebr");
pub const KHMR: u32 = tag!(b"khmr");
pub const KNDA: u32 = tag!(b"knda");
pub const LAO: u32 = tag!(b"lao ");
pub const LATN: u32 = tag!(b"latn");
pub const MLYM: u32 = tag!(b"mlym");
pub const MYMR: u32 = tag!(b"mymr");
pub const NKO: u32 = tag!(b"nko ");
pub const ORYA: u32 = tag!(b"orya");
pub const SINH: u32 = tag!(b"sinh");
pub const SYRC: u32 = tag!(b"syrc");
pub const TAML: u32 = tag!(b"taml");
pub const TELU: u32 = tag!(b"telu");
pub const THAI: u32 = tag!(b"thai");
pub const TIBT: u32 = tag!(b"tibt");

// Shaping feature tags requested from the layout collaborator
pub const ABVF: u32 = tag!(b"abvf");
pub const ABVS: u32 = tag!(b"abvs");
pub const AKHN: u32 = tag!(b"akhn");
pub const BLWF: u32 = tag!(b"blwf");
pub const BLWS: u32 = tag!(b"blws");
pub const CALT: u32 = tag!(b"calt");
pub const CCMP: u32 = tag!(b"ccmp");
pub const CJCT: u32 = tag!(b"cjct");
pub const FIN2: u32 = tag!(b"fin2");
pub const FIN3: u32 = tag!(b"fin3");
pub const FINA: u32 = tag!(b"fina");
pub const HALF: u32 = tag!(b"half");
pub const HALN: u32 = tag!(b"haln");
pub const INIT: u32 = tag!(b"init");
pub const ISOL: u32 = tag!(b"isol");
pub const LIGA: u32 = tag!(b"liga");
pub const LOCL: u32 = tag!(b"locl");
pub const MED2: u32 = tag!(b"med2");
pub const MEDI: u32 = tag!(b"medi");
pub const NUKT: u32 = tag!(b"nukt");
pub const PREF: u32 = tag!(b"pref");
pub const PRES: u32 = tag!(b"pres");
pub const PSTF: u32 = tag!(b"pstf");
pub const PSTS: u32 = tag!(b"psts");
pub const RLIG: u32 = tag!(b"rlig");
pub const RPHF: u32 = tag!(b"rphf");
pub const VATU: u32 = tag!(b"vatu");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(DisplayTag(ARAB).to_string(), "arab");
        assert_eq!(DisplayTag(LAO).to_string(), "lao ");
    }
}
