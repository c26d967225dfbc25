use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::sync::oneshot;

/// Builds the reply for a raw query; `None` leaves the query unanswered.
pub type Responder = Arc<dyn Fn(&[u8]) -> Option<Vec<u8>> + Send + Sync>;

pub struct MockDnsServer {
    addr: SocketAddr,
    udp_queries: Arc<AtomicUsize>,
    tcp_queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    /// UDP only, on an ephemeral loopback port.
    pub async fn start(udp: Responder) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        Self::serve(socket, udp, None)
    }

    /// UDP and TCP on the same loopback port.
    pub async fn start_with_tcp(udp: Responder, tcp: Responder) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let listener = TcpListener::bind(socket.local_addr()?).await?;
        Self::serve(socket, udp, Some((listener, tcp)))
    }

    fn serve(
        socket: UdpSocket,
        udp: Responder,
        tcp: Option<(TcpListener, Responder)>,
    ) -> Result<Self, std::io::Error> {
        let addr = socket.local_addr()?;
        let udp_queries = Arc::new(AtomicUsize::new(0));
        let tcp_queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let udp_count = udp_queries.clone();
        let tcp_count = tcp_queries.clone();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            let (listener, tcp_responder) = match tcp {
                Some((listener, responder)) => (Some(listener), Some(responder)),
                None => (None, None),
            };

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            udp_count.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = udp(&buf[..len]) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    accepted = accept(listener.as_ref()) => {
                        if let (Ok((stream, _)), Some(responder)) = (accepted, tcp_responder.clone()) {
                            let count = tcp_count.clone();
                            tokio::spawn(async move {
                                let _ = answer_tcp(stream, responder, count).await;
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            udp_queries,
            tcp_queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn udp_queries(&self) -> usize {
        self.udp_queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.tcp_queries.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn accept(
    listener: Option<&TcpListener>,
) -> std::io::Result<(TcpStream, SocketAddr)> {
    match listener {
        Some(listener) => listener.accept().await,
        None => std::future::pending().await,
    }
}

async fn answer_tcp(
    mut stream: TcpStream,
    responder: Responder,
    count: Arc<AtomicUsize>,
) -> std::io::Result<()> {
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;
    let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    stream.read_exact(&mut query).await?;
    count.fetch_add(1, Ordering::SeqCst);

    if let Some(response) = responder(&query) {
        stream
            .write_all(&(response.len() as u16).to_be_bytes())
            .await?;
        stream.write_all(&response).await?;
        stream.flush().await?;
    }
    Ok(())
}
