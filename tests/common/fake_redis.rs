//! Minimal RESP responder standing in for Redis in pool tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub struct FakeRedis {
    addr: SocketAddr,
    accepted: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl FakeRedis {
    /// Accepts connections and never writes a byte.
    pub async fn silent() -> Self {
        Self::start(None).await
    }

    /// Answers `PING` with `PONG`, `GET` with nil and anything else with
    /// `OK`. The first command named in `mute` gets no reply, and neither
    /// does anything after it on that connection.
    pub async fn answering(mute: &'static [&'static str]) -> Self {
        Self::start(Some(mute)).await
    }

    async fn start(mute: Option<&'static [&'static str]>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let accepted = Arc::new(AtomicUsize::new(0));

        let counter = accepted.clone();
        let task = tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(serve(socket, mute));
            }
        });

        Self {
            addr,
            accepted,
            task,
        }
    }

    pub fn url(&self) -> String {
        format!("redis://{}/", self.addr)
    }

    /// TCP connections accepted so far.
    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }
}

impl Drop for FakeRedis {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(mut socket: TcpStream, mute: Option<&'static [&'static str]>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let mut stalled = mute.is_none();

    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        if stalled {
            continue;
        }
        buf.extend_from_slice(&chunk[..n]);

        while let Some((command, used)) = parse_command(&buf) {
            buf.drain(..used);
            let name = command
                .first()
                .map(|part| String::from_utf8_lossy(part).to_ascii_uppercase())
                .unwrap_or_default();

            if mute.is_some_and(|muted| muted.contains(&name.as_str())) {
                stalled = true;
                break;
            }

            let reply: &[u8] = match name.as_str() {
                "PING" => b"+PONG\r\n",
                "GET" => b"$-1\r\n",
                _ => b"+OK\r\n",
            };
            if socket.write_all(reply).await.is_err() {
                return;
            }
        }
    }
}

/// Parses one RESP array of bulk strings, returning it and the bytes used.
fn parse_command(buf: &[u8]) -> Option<(Vec<Vec<u8>>, usize)> {
    let (count, mut pos) = parse_header(buf, 0, b'*')?;
    let mut parts = Vec::with_capacity(count);
    for _ in 0..count {
        let (len, start) = parse_header(buf, pos, b'$')?;
        let end = start + len;
        if buf.len() < end + 2 {
            return None;
        }
        parts.push(buf[start..end].to_vec());
        pos = end + 2;
    }
    Some((parts, pos))
}

fn parse_header(buf: &[u8], pos: usize, prefix: u8) -> Option<(usize, usize)> {
    if *buf.get(pos)? != prefix {
        return None;
    }
    let rest = &buf[pos + 1..];
    let line_end = rest.windows(2).position(|w| w == b"\r\n")?;
    let value = std::str::from_utf8(&rest[..line_end]).ok()?.parse().ok()?;
    Some((value, pos + 1 + line_end + 2))
}
