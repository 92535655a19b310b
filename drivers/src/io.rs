/*++

Licensed under the Apache-2.0 license.

File Name:

    io.rs

Abstract:

    File contains the byte channel to the host. Pre-Castor hardware talks
    raw bytes over the UART; Castor and later put a USB controller in front
    of the UART that multiplexes several endpoints, framing each packet as
    `[mode, length, data...]`.

--*/

use tkey_luks_error::{TkeyLuksError, TkeyLuksResult};

use crate::uart::Uart;

/// First hardware version that carries the USB mux
pub const CASTOR_VERSION: u32 = 1;

/// Largest data part of a single mux packet
const MUX_MAX_PAYLOAD: usize = 255;

/// Output destination
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IoEnd {
    /// Raw UART, no mux header
    Uart = 0x01,
    /// Mux: debug pipe
    Debug = 0x08,
    /// Mux: USB CDC serial, the application's command channel
    Cdc = 0x20,
    /// Mux: FIDO HID
    Fido = 0x40,
    /// Mux: CCID
    Ccid = 0x80,
}

impl IoEnd {
    fn from_mode(mode: u8) -> Option<Self> {
        match mode {
            0x08 => Some(IoEnd::Debug),
            0x20 => Some(IoEnd::Cdc),
            0x40 => Some(IoEnd::Fido),
            0x80 => Some(IoEnd::Ccid),
            _ => None,
        }
    }
}

/// Blocking byte channel to the host
pub trait Io {
    /// Fill `buf` with the next bytes from the host command channel
    fn read(&mut self, buf: &mut [u8]) -> TkeyLuksResult<()>;

    /// Send `buf` to `dst`
    fn write(&mut self, dst: IoEnd, buf: &[u8]) -> TkeyLuksResult<()>;
}

/// Host channel on TK1 hardware
pub struct Tk1Io {
    uart: Uart,
    muxed: bool,
    /// CDC bytes left in the current mux packet
    pending: usize,
}

impl Tk1Io {
    pub fn new(uart: Uart, hw_version: u32) -> Self {
        Self {
            uart,
            muxed: hw_version >= CASTOR_VERSION,
            pending: 0,
        }
    }

    /// Consume mux headers until a CDC packet with data is current
    fn next_cdc_packet(&mut self) -> TkeyLuksResult<()> {
        while self.pending == 0 {
            let mode = self.uart.read_byte();
            let len = self.uart.read_byte() as usize;
            match IoEnd::from_mode(mode) {
                Some(IoEnd::Cdc) => self.pending = len,
                Some(_) => {
                    // Not ours; drain it.
                    for _ in 0..len {
                        self.uart.read_byte();
                    }
                }
                None => return Err(TkeyLuksError::DRIVER_IO_MUX_UNKNOWN_MODE),
            }
        }
        Ok(())
    }
}

impl Io for Tk1Io {
    fn read(&mut self, buf: &mut [u8]) -> TkeyLuksResult<()> {
        for byte in buf.iter_mut() {
            if self.muxed {
                self.next_cdc_packet()?;
                self.pending -= 1;
            }
            *byte = self.uart.read_byte();
        }
        Ok(())
    }

    fn write(&mut self, dst: IoEnd, buf: &[u8]) -> TkeyLuksResult<()> {
        match dst {
            IoEnd::Uart => buf.iter().for_each(|&b| self.uart.write_byte(b)),
            _ => {
                for chunk in buf.chunks(MUX_MAX_PAYLOAD) {
                    self.uart.write_byte(dst as u8);
                    self.uart.write_byte(chunk.len() as u8);
                    chunk.iter().for_each(|&b| self.uart.write_byte(b));
                }
            }
        }
        Ok(())
    }
}
