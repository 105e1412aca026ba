use std::{
    net::{Ipv4Addr, SocketAddr, TcpListener},
    thread,
    time::Duration,
};

use anyhow::Context;
use log::info;
use socket2::{Domain, Protocol, Socket, Type};

use picopanel_common::NetworkConfig;

use crate::{error::JoinError, hal::NetworkLink};

// Blocking, bounded-wait join: one status poll per interval, one progress
// line per waiting second, fatal once the wait allowance runs out.
pub fn join_network<L: NetworkLink>(
    link: &mut L,
    network: &NetworkConfig,
) -> Result<Ipv4Addr, JoinError> {
    link.begin(&network.wifi_ssid, &network.wifi_pass)
        .map_err(JoinError::Begin)?;

    let mut remaining = network.connect_timeout_secs;
    while remaining > 0 {
        if link.is_connected().map_err(JoinError::Status)? {
            break;
        }
        remaining -= 1;
        info!("waiting for wifi connection ...");
        thread::sleep(Duration::from_millis(network.poll_interval_ms));
    }

    if !link.is_connected().map_err(JoinError::Status)? {
        return Err(JoinError::TimedOut {
            waited_secs: network.connect_timeout_secs,
        });
    }

    let address = link
        .address()
        .map_err(JoinError::Status)?
        .ok_or(JoinError::MissingAddress)?;

    info!("wifi connected, address {address}");
    Ok(address)
}

pub fn bind_listener(port: u16) -> anyhow::Result<TcpListener> {
    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));

    let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))
        .context("failed to create listener socket")?;
    socket
        .set_reuse_address(true)
        .context("failed to enable address reuse")?;
    socket
        .bind(&address.into())
        .with_context(|| format!("failed to bind listener at {address}"))?;
    socket.listen(16).context("failed to listen")?;

    Ok(socket.into())
}
