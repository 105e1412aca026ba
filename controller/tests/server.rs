use std::{
    io::{Read, Write},
    net::{Ipv4Addr, SocketAddr, TcpStream},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    thread,
    time::Duration,
};

use picopanel_common::{PanelConfig, PanelEngine};
use picopanel_controller::{
    hal::{Indicator, RawAdc, Restart},
    net,
    server::{serve_forever, PanelContext},
};

#[derive(Clone, Default)]
struct SharedIndicator {
    levels: Arc<Mutex<Vec<bool>>>,
}

impl Indicator for SharedIndicator {
    fn set_high(&mut self) -> anyhow::Result<()> {
        self.levels.lock().unwrap().push(true);
        Ok(())
    }

    fn set_low(&mut self) -> anyhow::Result<()> {
        self.levels.lock().unwrap().push(false);
        Ok(())
    }
}

struct FixedAdc(u16);

impl RawAdc for FixedAdc {
    fn read_raw(&mut self) -> anyhow::Result<u16> {
        Ok(self.0)
    }
}

#[derive(Clone, Default)]
struct SharedRestart {
    requested: Arc<AtomicBool>,
}

impl Restart for SharedRestart {
    fn restart(&mut self) {
        self.requested.store(true, Ordering::SeqCst);
    }
}

struct TestServer {
    address: SocketAddr,
    indicator: SharedIndicator,
    restart: SharedRestart,
    handle: thread::JoinHandle<anyhow::Result<()>>,
}

fn spawn_server() -> TestServer {
    let listener = net::bind_listener(0).unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = SocketAddr::from((Ipv4Addr::LOCALHOST, port));

    let indicator = SharedIndicator::default();
    let restart = SharedRestart::default();

    let config = PanelConfig {
        blink_dwell_ms: 0,
        value_pulse_ms: 0,
        shutdown_grace_ms: 0,
        ..PanelConfig::default()
    };
    let mut ctx = PanelContext {
        engine: PanelEngine::new(config),
        indicator: indicator.clone(),
        adc: FixedAdc(14226),
        restart: restart.clone(),
        address: Ipv4Addr::new(192, 168, 1, 50),
    };

    let handle = thread::spawn(move || serve_forever(&listener, &mut ctx));

    TestServer {
        address,
        indicator,
        restart,
        handle,
    }
}

fn exchange(address: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(address).unwrap();
    stream.write_all(request.as_bytes()).unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

fn fetched_value(response: &str) -> u8 {
    response
        .split("Fetched value: ")
        .nth(1)
        .and_then(|rest| rest.split('<').next())
        .and_then(|digits| digits.trim().parse().ok())
        .unwrap()
}

#[test]
fn control_panel_round_trip() {
    let server = spawn_server();

    let on = exchange(server.address, "GET /lighton? HTTP/1.0\r\n\r\n");
    assert!(on.starts_with("HTTP/1.0 200 OK\r\nContent-type: text/html\r\n\r\n"));
    assert!(on.contains("LED state: ON"));
    assert!(on.contains("IP address: 192.168.1.50"));

    let value = exchange(server.address, "GET /value? HTTP/1.0\r\n\r\n");
    assert!(fetched_value(&value) <= 20);
    // The feedback pulse must not disturb the reported label.
    assert!(value.contains("LED state: ON"));

    let levels = server.indicator.levels.lock().unwrap().clone();
    assert_eq!(levels, vec![true, true, false]);
}

#[test]
fn sticky_blink_label_is_visible_over_the_wire() {
    let server = spawn_server();

    let blink = exchange(server.address, "GET /lightblink? HTTP/1.0\r\n\r\n");
    assert!(blink.contains("LED state: BLINKING"));

    // An unrecognized token is a no-op and still reports BLINKING.
    let noop = exchange(server.address, "GET /whatever? HTTP/1.0\r\n\r\n");
    assert!(noop.contains("LED state: BLINKING"));
    assert_eq!(fetched_value(&noop), 0);
}

#[test]
fn faulty_connections_do_not_stop_the_server() {
    let server = spawn_server();

    // Client that connects and vanishes without sending anything.
    drop(TcpStream::connect(server.address).unwrap());

    // Client that aborts mid-request with an RST.
    {
        use socket2::{Domain, Protocol, Socket, Type};

        let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP)).unwrap();
        socket.connect(&server.address.into()).unwrap();
        socket.set_linger(Some(Duration::from_secs(0))).unwrap();
        socket.send(b"GET /light").unwrap();
        drop(socket);
    }

    let response = exchange(server.address, "GET /value? HTTP/1.0\r\n\r\n");
    assert!(response.starts_with("HTTP/1.0 200 OK"));
    assert!(fetched_value(&response) <= 20);
}

#[test]
fn shutdown_acknowledges_then_resets() {
    let server = spawn_server();

    let ack = exchange(server.address, "GET /shutdown? HTTP/1.0\r\n\r\n");
    assert!(ack.contains("<h1>Shutting down</h1>"));
    assert!(!ack.contains("LED state"));

    server.handle.join().unwrap().unwrap();
    assert!(server.restart.requested.load(Ordering::SeqCst));
}
