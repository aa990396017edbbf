#![allow(dead_code)]

use std::fmt;

use si5351_planner::device::{ DiagnosticSink, RegisterWriter };


/// Records every register write, optionally failing from the n-th write on
#[derive(Debug,Default)]
pub struct RecordingWriter {
    pub writes: Vec<(u8, u8)>,
    pub fail_at: Option<usize>,
}

impl RecordingWriter {
    pub fn failing_at(n: usize) -> Self {
        RecordingWriter { writes: Vec::new(), fail_at: Some(n) }
    }

    /// Last value written to `reg`
    pub fn last(&self, reg: u8) -> Option<u8> {
        self.writes.iter().rev().find(|w| w.0 == reg).map(|w| w.1)
    }

    /// Number of register programs written, each writes the crystal load once
    pub fn programs(&self) -> usize {
        self.writes.iter().filter(|w| w.0 == 183).count()
    }
}

impl RegisterWriter for RecordingWriter {
    type Error = ();

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), ()> {
        if self.fail_at == Some(self.writes.len()) {
            return Err(());
        }
        self.writes.push((reg, value));
        Ok(())
    }
}


/// Keeps diagnostics as strings
#[derive(Debug,Default)]
pub struct Messages(pub Vec<String>);

impl DiagnosticSink for Messages {
    fn log(&mut self, args: fmt::Arguments<'_>) {
        self.0.push(fmt::format(args));
    }
}


/// Decodes an 8 byte multisynth block back into (P1, P2, P3, R)
pub fn decode_block(b: &[u8]) -> (u32, u32, u32, u8) {
    let p3 = ((b[5] as u32 & 0xF0) << 12) | ((b[0] as u32) << 8) | b[1] as u32;
    let p2 = ((b[5] as u32 & 0x0F) << 16) | ((b[6] as u32) << 8) | b[7] as u32;
    let p1 = ((b[2] as u32 & 0x03) << 16) | ((b[3] as u32) << 8) | b[4] as u32;
    (p1, p2, p3, (b[2] >> 4) & 0x07)
}

/// Register contents after all writes, registers never written are None
pub fn register_file(writes: &[(u8, u8)]) -> [Option<u8>; 256] {
    let mut regs = [None; 256];
    for &(r, v) in writes {
        regs[r as usize] = Some(v);
    }
    regs
}

pub fn block(regs: &[Option<u8>; 256], base: u8) -> [u8; 8] {
    let mut b = [0; 8];
    for (i, v) in b.iter_mut().enumerate() {
        *v = regs[base as usize + i].expect("block register not written");
    }
    b
}
