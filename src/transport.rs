use std::io::{self, Write};

use anyhow::{Context as _, Result, bail};
use serialport::{SerialPort, SerialPortInfo, SerialPortType};

use crate::packet::SHUTDOWN_BYTE;

pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Human readable description of a port, as shown by the OS device list.
pub fn port_description(info: &SerialPortInfo) -> Option<&str> {
    match &info.port_type {
        SerialPortType::UsbPort(usb) => usb.product.as_deref(),
        _ => None,
    }
}

pub fn find_port<'a>(ports: &'a [SerialPortInfo], device_name: &str) -> Option<&'a str> {
    ports
        .iter()
        .find(|p| port_description(p) == Some(device_name))
        .map(|p| p.port_name.as_str())
}

pub fn discover(device_name: &str) -> Result<String> {
    let ports = serialport::available_ports().context("failed to enumerate serial ports")?;

    if let Some(port_name) = find_port(&ports, device_name) {
        return Ok(port_name.to_string());
    }

    let seen: Vec<String> = ports
        .iter()
        .map(|p| match port_description(p) {
            Some(description) => format!("{} ({description})", p.port_name),
            None => p.port_name.clone(),
        })
        .collect();
    bail!(
        "serial device not found: {device_name}: available ports: [{}]",
        seen.join(", ")
    )
}

/// Exclusively owned serial connection to the display.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    pub fn open(port_name: &str, baud_rate: u32) -> Result<Self> {
        let port = serialport::new(port_name, baud_rate)
            .open()
            .with_context(|| format!("failed to open serial port: {port_name}"))?;

        Ok(Self { port })
    }
}

impl Write for SerialTransport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.port.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.port.flush()
    }
}

pub fn send_packet<W: Write>(transport: &mut W, bytes: &[u8]) -> Result<()> {
    transport
        .write_all(bytes)
        .context("failed to write packet")?;
    transport.flush().context("failed to flush packet")?;

    Ok(())
}

pub fn send_terminator<W: Write>(transport: &mut W) -> Result<()> {
    send_packet(transport, &[SHUTDOWN_BYTE]).context("failed to send terminator")
}
