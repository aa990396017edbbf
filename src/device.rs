//! Device

use core::fmt;

use embedded_hal::blocking::i2c::Write;

use crate::{ config::*, constants::*, crystal::*, errors::*, frequency::*, program::*, };


/// Single register write transport
pub trait RegisterWriter {
    type Error;

    /// Writes `value` to register `reg`.
    /// Blocking call.
    fn write_register(self: &mut Self, reg: u8, value: u8) -> Result<(), Self::Error>;
}

/// Diagnostic message sink
pub trait DiagnosticSink {
    fn log(self: &mut Self, args: fmt::Arguments<'_>);
}

/// Drops all diagnostics
#[derive(Debug,Copy,Clone,Default)]
pub struct NoDiagnostics;

impl DiagnosticSink for NoDiagnostics {
    #[inline]
    fn log(self: &mut Self, _args: fmt::Arguments<'_>) {}
}

/// Forwards diagnostics to the `log` facade
#[derive(Debug,Copy,Clone,Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn log(self: &mut Self, args: fmt::Arguments<'_>) {
        log::warn!("{}", args);
    }
}


/// I2C transport, one `[register, value]` write per register
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C>
where I2C: Write,
{
    /// Device at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, I2C_ADDRESS)
    }

    /// Device at a non-default address (Si5351 variants strapped differently)
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        I2cInterface { i2c, address }
    }

    /// Gives the bus back
    pub fn release(self: Self) -> I2C {
        self.i2c
    }
}

impl<I2C> RegisterWriter for I2cInterface<I2C>
where I2C: Write,
{
    type Error = I2C::Error;

    #[inline]
    fn write_register(self: &mut Self, reg: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[reg, value])
    }
}


/// Si5351 device.
///
/// Keeps the whole configuration and reprograms the chip from it:
/// after every change in immediate mode, or once per
/// [commit_batch](Si5351::commit_batch) in batch mode.
pub struct Si5351<W, D = NoDiagnostics> {
    writer: W,
    diag: D,
    cfg: DeviceConfig,
    batch: bool,
    plan: Option<FrequencyPlan>,
}

impl<W> Si5351<W, NoDiagnostics>
where W: RegisterWriter,
{
    /// Creates the device without diagnostics, see [with_diagnostics](Si5351::with_diagnostics).
    pub fn new(writer: W, crystal: Crystal) -> Self {
        Self::with_diagnostics(writer, NoDiagnostics, crystal)
    }
}

impl<W, D> Si5351<W, D>
where W: RegisterWriter,
      D: DiagnosticSink,
{
    /// Creates the device (unconfigured, nothing written yet).
    /// All outputs disabled, no PLL masters, immediate mode.
    ///
    /// Call [init](Si5351::init) before anything else.
    pub fn with_diagnostics(writer: W, diag: D, crystal: Crystal) -> Self {
        Si5351 {
            writer,
            diag,
            cfg: DeviceConfig::new(crystal),
            batch: false,
            plan: None,
        }
    }

    /// Resets the configuration to all outputs disabled, leaves batch mode
    /// and writes the initial register program (disable states, crystal load).
    ///
    /// On failure the device can still be [released](Si5351::release).
    pub fn init(self: &mut Self) -> Result<(), Error> {
        self.cfg = DeviceConfig::new(self.cfg.crystal);
        self.batch = false;
        self.configure()
    }

    /// Sets up a clock output.
    ///
    /// `clk` - output, 0..8
    /// `pll` - PLL the output is derived from
    /// `frequency` - Hz, 0 disables the output
    /// `phase` - phase offset, 7 bits
    /// `invert` - invert the output
    /// `pll_master` - derive the PLL frequency from this output
    pub fn set_output(
        self: &mut Self,
        clk: u8,
        pll: Pll,
        frequency: u32,
        phase: u8,
        invert: bool,
        pll_master: bool,
    ) -> Result<(), Error> {
        if let Err(e) = self.cfg.set_output(clk, pll, frequency, phase, invert, pll_master) {
            self.diag.log(format_args!("{}", e));
            return Err(e);
        }
        if pll_master {
            self.diag.log(format_args!("PLL {:?} master is CLK{}", pll, clk));
        }
        self.update()
    }

    /// Output state while disabled, for one or all outputs
    pub fn set_disable_state(self: &mut Self, target: Outputs, state: DisableState) -> Result<(), Error> {
        self.update_outputs(target, |o| o.disable_state = state)
    }

    /// Output drive strength, for one or all outputs
    pub fn set_drive_strength(self: &mut Self, target: Outputs, drive: DriveStrength) -> Result<(), Error> {
        self.update_outputs(target, |o| o.drive = drive)
    }

    /// Stop reprogramming the device after every change
    pub fn begin_batch(self: &mut Self) {
        self.batch = true;
    }

    /// Leave batch mode and write everything changed since [begin_batch](Si5351::begin_batch)
    pub fn commit_batch(self: &mut Self) -> Result<(), Error> {
        self.batch = false;
        self.configure()
    }

    #[inline]
    pub fn is_batch(self: &Self) -> bool {
        self.batch
    }

    #[inline]
    pub fn config(self: &Self) -> &DeviceConfig {
        &self.cfg
    }

    /// Last successfully applied frequency plan
    #[inline]
    pub fn plan(self: &Self) -> Option<&FrequencyPlan> {
        self.plan.as_ref()
    }

    /// VCO frequency of the last applied plan, `None` for unused PLLs
    pub fn vco_frequency(self: &Self, pll: Pll) -> Option<u32> {
        self.plan.as_ref().and_then(|p| p.vco_hz(pll))
    }

    #[inline]
    pub fn writer(self: &Self) -> &W {
        &self.writer
    }

    /// Gives the transport and the diagnostic sink back
    pub fn release(self: Self) -> (W, D) {
        (self.writer, self.diag)
    }

    fn update_outputs<F>(self: &mut Self, target: Outputs, f: F) -> Result<(), Error>
    where F: FnMut(&mut OutputConfig)
    {
        if let Err(e) = self.cfg.update_outputs(target, f) {
            self.diag.log(format_args!("{}", e));
            return Err(e);
        }
        self.update()
    }

    /// Reprograms the device unless batching
    fn update(self: &mut Self) -> Result<(), Error> {
        if self.batch {
            Ok(())
        } else {
            self.configure()
        }
    }

    /// Plans the current configuration and writes the full register program.
    /// A configuration that doesn't plan leaves the device untouched,
    /// a transport failure leaves it partially written.
    fn configure(self: &mut Self) -> Result<(), Error> {
        let plan = match FrequencyPlan::new(&self.cfg) {
            Ok(p) => p,
            Err(e) => {
                self.diag.log(format_args!("configuration rejected: {}", e));
                return Err(e);
            }
        };
        let program = RegisterProgram::new(&self.cfg, &plan);

        for &(reg, value) in program.writes() {
            if self.writer.write_register(reg, value).is_err() {
                self.diag.log(format_args!("write of register {} failed", reg));
                self.plan = None;
                return Err(Error::Transport);
            }
        }

        self.plan = Some(plan);
        Ok(())
    }
}
