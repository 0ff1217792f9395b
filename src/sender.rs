use std::io::{self, Write};
use std::net::{Ipv4Addr, SocketAddrV4, UdpSocket};

use log::{debug, error, info};
use thiserror::Error;

use crate::at::COMMAND_PAYLOAD;

pub const DRONE_ADDR: &str = "192.168.1.1";
pub const CMD_PORT: u16 = 5556;

#[derive(Debug, Error)]
pub enum CommandError {
    /// the destination literal isn't a dotted quad
    #[error("couldn't parse {0:?} as an IPv4 address")]
    AddressParse(String),
    #[error("couldn't bind to 0.0.0.0:0: {0}")]
    Socket(#[source] io::Error),
    #[error("couldn't send message: {0}")]
    Send(#[source] io::Error),
}

/// Bind an ephemeral socket, parse `addr` and fire `payload` at `addr:port`
/// exactly once. Returns whatever the OS claims it queued; nobody is waiting
/// on an answer. The socket is dropped on the way out no matter what.
pub fn send_datagram(addr: &str, port: u16, payload: &[u8]) -> Result<usize, CommandError> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).map_err(CommandError::Socket)?;

    if let Ok(local) = socket.local_addr() {
        debug!("bound {}", local);
    }

    let ip: Ipv4Addr = addr
        .parse()
        .map_err(|_| CommandError::AddressParse(addr.to_string()))?;
    let target = SocketAddrV4::new(ip, port);

    let amt = socket.send_to(payload, target).map_err(CommandError::Send)?;

    // short writes are not retried
    debug!("send({:?}) → {} queued {}/{} bytes", String::from_utf8_lossy(payload), target, amt, payload.len());

    Ok(amt)
}

/// Send the LED command to the drone. Only a bad destination literal gets
/// reported on the console; everything else is best effort and ignored.
pub fn send_command() {
    send_command_to(DRONE_ADDR, CMD_PORT, &mut io::stdout())
}

pub(crate) fn send_command_to(addr: &str, port: u16, out: &mut impl Write) {
    match send_datagram(addr, port, &COMMAND_PAYLOAD) {
        Ok(amt) => info!("sent {} bytes to {}:{}", amt, addr, port),
        Err(e @ CommandError::AddressParse(_)) => {
            error!("{}", e);
            // a console we can't write to changes nothing
            let _ = writeln!(out, "Crap!, Init failed");
        }
        Err(e) => debug!("ignoring {}", e),
    }
}
