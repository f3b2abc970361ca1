// In: src/bridge/format.rs

//! Defines the on-disk / on-wire container layouts.
//!
//! ### Minimal (canonical)
//! ```text
//! byte 0:      escape_byte
//! bytes 1..:   substituted body
//! ```
//!
//! ### SpaceRun
//! ```text
//! byte 0:      escape_byte
//! bytes 1..5:  leading_space_count  (u32 LE)
//! bytes 5..9:  trailing_space_count (u32 LE)
//! bytes 9..:   substituted body of the space-trimmed input
//! ```
//!
//! A byte string does not say which layout it uses. The reader must be told,
//! via `ContainerFormat`, and never guesses from the length.

use serde::{Deserialize, Serialize};

use crate::config::ContainerFormat;
use crate::error::LexisubError;

/// Header size of the minimal layout.
pub const MINIMAL_HEADER_LEN: usize = 1;
/// Header size of the space-run layout.
pub const SPACE_RUN_HEADER_LEN: usize = 1 + 2 * std::mem::size_of::<u32>();

impl ContainerFormat {
    pub fn header_len(self) -> usize {
        match self {
            ContainerFormat::Minimal => MINIMAL_HEADER_LEN,
            ContainerFormat::SpaceRun => SPACE_RUN_HEADER_LEN,
        }
    }
}

/// Space runs trimmed from both ends of the input before substitution.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpaceRun {
    pub leading: u32,
    pub trailing: u32,
}

impl SpaceRun {
    /// Splits `input` into (leading run, core, trailing run).
    ///
    /// An input made only of spaces is all leading run.
    pub fn split(input: &[u8]) -> Result<(SpaceRun, &[u8]), LexisubError> {
        let leading = input.iter().take_while(|&&b| b == b' ').count();
        let rest = &input[leading..];
        let trailing = rest.iter().rev().take_while(|&&b| b == b' ').count();
        let core = &rest[..rest.len() - trailing];

        let to_u32 =
            |run: usize| u32::try_from(run).map_err(|_| LexisubError::SpaceRunOverflow(run));
        Ok((
            SpaceRun {
                leading: to_u32(leading)?,
                trailing: to_u32(trailing)?,
            },
            core,
        ))
    }
}

/// Header plus substituted body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub escape_byte: u8,
    /// Present exactly when the container uses the space-run layout.
    pub space_run: Option<SpaceRun>,
    pub body: Vec<u8>,
}

impl Container {
    pub fn format(&self) -> ContainerFormat {
        match self.space_run {
            Some(_) => ContainerFormat::SpaceRun,
            None => ContainerFormat::Minimal,
        }
    }

    pub fn header_len(&self) -> usize {
        self.format().header_len()
    }

    /// Total serialized size.
    pub fn encoded_len(&self) -> usize {
        self.header_len() + self.body.len()
    }

    /// Serializes header then body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.push(self.escape_byte);
        if let Some(run) = self.space_run {
            out.extend_from_slice(&run.leading.to_le_bytes());
            out.extend_from_slice(&run.trailing.to_le_bytes());
        }
        out.extend_from_slice(&self.body);
        out
    }

    /// Parses a container of the given layout.
    pub fn from_bytes(bytes: &[u8], format: ContainerFormat) -> Result<Self, LexisubError> {
        let header_len = format.header_len();
        if bytes.len() < header_len {
            return Err(LexisubError::MalformedContainer(format!(
                "{} bytes is shorter than the {}-byte {:?} header",
                bytes.len(),
                header_len,
                format
            )));
        }

        let escape_byte = bytes[0];
        if escape_byte == 0 {
            return Err(LexisubError::MalformedContainer(
                "escape byte 0 is reserved and never written".to_string(),
            ));
        }

        let space_run = match format {
            ContainerFormat::Minimal => None,
            ContainerFormat::SpaceRun => Some(SpaceRun {
                leading: read_u32_le(&bytes[1..5]),
                trailing: read_u32_le(&bytes[5..9]),
            }),
        };

        Ok(Container {
            escape_byte,
            space_run,
            body: bytes[header_len..].to_vec(),
        })
    }
}

fn read_u32_le(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_le_bytes(buf)
}

/// Header summary of a serialized container, returned by `analyze_container`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ContainerStats {
    pub format: ContainerFormat,
    pub escape_byte: u8,
    pub space_run: Option<SpaceRun>,
    pub header_size: usize,
    pub body_size: usize,
    pub total_size: usize,
}
