use std::fmt;

/// The one command this crate ever puts on the wire. It's the 15 visible
/// characters padded with NULs out to a 17 byte buffer, and all 17 bytes go
/// out, padding included.
pub const COMMAND_PAYLOAD: [u8; 17] = *b"AT*LED=5,6,1,2\r\0\0";

/// A single AT parameter. The drone wants everything on the wire as text, but
/// floats get there as the decimal form of their bit pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum AtParam {
    Int(i32),
    Float(f32),
    Str(String),
}

impl fmt::Display for AtParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtParam::Int(i) => write!(f, ",{}", i),
            AtParam::Float(v) => write!(f, ",{}", f2i(*v)),
            AtParam::Str(s) => write!(f, ",\"{}\"", s),
        }
    }
}

/// `AT*<NAME>=<seq>[,param]*\r`
#[derive(Debug, Clone, PartialEq)]
pub struct AtCommand {
    pub name: String,
    pub seq: u32,
    pub params: Vec<AtParam>,
}

impl AtCommand {
    pub fn new(name: &str, seq: u32, params: Vec<AtParam>) -> Self {
        AtCommand {
            name: name.to_string(),
            seq,
            params,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for AtCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AT*{}={}", self.name, self.seq)?;
        for p in &self.params {
            write!(f, "{}", p)?;
        }
        write!(f, "\r")
    }
}

/// Reinterpret the IEEE-754 bits of `v` as a signed int.
fn f2i(v: f32) -> i32 {
    v.to_bits() as i32
}
