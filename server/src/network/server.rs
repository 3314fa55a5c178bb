//! UDP room server implementation.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, error, info, warn};
use tokio::net::UdpSocket;

use room_shared::{ClientMessage, ServerMessage, PROTOCOL_VERSION};

use crate::world::RoomWorld;

/// Maximum packet size
const MAX_PACKET_SIZE: usize = 1200;

/// Connection timeout in seconds
const CONNECTION_TIMEOUT: f32 = 30.0;

/// Client connection state
#[derive(Debug)]
pub struct ClientConnection {
    pub addr: SocketAddr,
    pub session_id: u64,
    pub last_seen: Instant,
    /// Outgoing message queue
    pub outgoing_queue: Vec<ServerMessage>,
}

impl ClientConnection {
    pub fn new(addr: SocketAddr, session_id: u64) -> Self {
        Self {
            addr,
            session_id,
            last_seen: Instant::now(),
            outgoing_queue: Vec::new(),
        }
    }

    pub fn is_timed_out(&self) -> bool {
        self.last_seen.elapsed().as_secs_f32() > CONNECTION_TIMEOUT
    }
}

/// Room server
pub struct Server {
    socket: Arc<UdpSocket>,
    clients: HashMap<SocketAddr, ClientConnection>,
    next_session_id: u64,
}

impl Server {
    /// Create a new server listening on the given port
    pub async fn new(port: u16) -> Result<Self, std::io::Error> {
        let addr = format!("0.0.0.0:{}", port);
        let socket = UdpSocket::bind(&addr).await?;

        Ok(Self {
            socket: Arc::new(socket),
            clients: HashMap::new(),
            next_session_id: 1,
        })
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Process incoming network messages
    pub async fn process_incoming(&mut self, world: &mut RoomWorld) {
        let mut buf = [0u8; MAX_PACKET_SIZE];

        // Non-blocking receive loop
        loop {
            match self.socket.try_recv_from(&mut buf) {
                Ok((len, addr)) => {
                    self.handle_packet(&buf[..len], addr, world).await;
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    break;
                }
                Err(e) => {
                    error!("Error receiving packet: {}", e);
                    break;
                }
            }
        }

        // Check for timed out clients
        self.check_timeouts(world);
    }

    /// Handle a received packet
    async fn handle_packet(&mut self, data: &[u8], addr: SocketAddr, world: &mut RoomWorld) {
        let message = match ClientMessage::deserialize(data) {
            Ok(msg) => msg,
            Err(e) => {
                warn!("Failed to deserialize packet from {}: {}", addr, e);
                return;
            }
        };

        if let ClientMessage::Hello { protocol_version } = message {
            self.handle_hello(addr, protocol_version, world).await;
            return;
        }

        // Everything else needs a session
        let session_id = match self.clients.get_mut(&addr) {
            Some(client) => {
                client.last_seen = Instant::now();
                client.session_id
            }
            None => {
                debug!("Ignoring {:?} from unknown address {}", message, addr);
                return;
            }
        };

        match message {
            ClientMessage::Hello { .. } => {}
            ClientMessage::FloorClick { position } => {
                if let Some(msg) = world.handle_floor_click(session_id, position) {
                    self.queue_for(addr, msg);
                }
            }
            ClientMessage::FocusHotspot { hotspot } => {
                for msg in world.focus_hotspot(session_id, hotspot) {
                    self.queue_for(addr, msg);
                }
            }
            ClientMessage::CycleHotspot { forward } => {
                if let Some(msg) = world.cycle_hotspot(session_id, forward) {
                    self.queue_for(addr, msg);
                }
            }
            ClientMessage::ClearFocus => {
                if let Some(msg) = world.clear_focus(session_id) {
                    self.queue_for(addr, msg);
                }
            }
            ClientMessage::RequestLayout => {
                let msg = world.layout_snapshot();
                self.queue_for(addr, msg);
            }
            ClientMessage::Disconnect => {
                self.handle_disconnect(addr, world);
            }
        }
    }

    /// Open a session, or re-welcome a client that already has one
    async fn handle_hello(
        &mut self,
        addr: SocketAddr,
        protocol_version: u32,
        world: &mut RoomWorld,
    ) {
        if protocol_version != PROTOCOL_VERSION {
            warn!(
                "Client {} speaks protocol {}, expected {}",
                addr, protocol_version, PROTOCOL_VERSION
            );
            let msg = ServerMessage::VersionMismatch { expected: PROTOCOL_VERSION };
            self.send_to(addr, &msg).await;
            return;
        }

        let session_id = match self.clients.get_mut(&addr) {
            Some(client) => {
                client.last_seen = Instant::now();
                client.session_id
            }
            None => {
                let session_id = self.next_session_id;
                self.next_session_id += 1;
                self.clients.insert(addr, ClientConnection::new(addr, session_id));
                world.spawn_session(session_id);
                info!("Client {} connected as session {}", addr, session_id);
                session_id
            }
        };

        if let Some(session) = world.get_session(session_id) {
            let msg = ServerMessage::Welcome {
                session_id,
                position: session.avatar.position.to_3d(),
                rotation: session.avatar.rotation,
            };
            self.send_to(addr, &msg).await;
        }
    }

    /// Handle client disconnect
    fn handle_disconnect(&mut self, addr: SocketAddr, world: &mut RoomWorld) {
        if let Some(connection) = self.clients.remove(&addr) {
            world.despawn_session(connection.session_id);
            info!("Client {} (session {}) disconnected", connection.addr, connection.session_id);
        }
    }

    fn check_timeouts(&mut self, world: &mut RoomWorld) {
        let timed_out: Vec<SocketAddr> = self
            .clients
            .iter()
            .filter(|(_, c)| c.is_timed_out())
            .map(|(addr, _)| *addr)
            .collect();

        for addr in timed_out {
            if let Some(connection) = self.clients.remove(&addr) {
                world.despawn_session(connection.session_id);
                warn!("Client {} (session {}) timed out", connection.addr, connection.session_id);
            }
        }
    }

    /// Send every client the state of its own avatar
    pub fn broadcast_avatar_states(&mut self, world: &RoomWorld, tick: u64) {
        for client in self.clients.values_mut() {
            if let Some(session) = world.get_session(client.session_id) {
                client.outgoing_queue.push(ServerMessage::AvatarUpdate {
                    tick,
                    state: session.state(),
                });
            }
        }
    }

    /// Process outgoing message queues
    pub async fn process_outgoing(&mut self) {
        for (addr, client) in &mut self.clients {
            for msg in client.outgoing_queue.drain(..) {
                let data = match msg.serialize() {
                    Ok(d) => d,
                    Err(e) => {
                        error!("Failed to serialize message for {}: {}", addr, e);
                        continue;
                    }
                };
                if let Err(e) = self.socket.send_to(&data, addr).await {
                    error!("Failed to send to {}: {}", addr, e);
                }
            }
        }
    }

    /// Send a message to a specific address right away
    async fn send_to(&self, addr: SocketAddr, msg: &ServerMessage) {
        let data = match msg.serialize() {
            Ok(d) => d,
            Err(e) => {
                error!("Failed to serialize message for {}: {}", addr, e);
                return;
            }
        };
        if let Err(e) = self.socket.send_to(&data, addr).await {
            error!("Failed to send to {}: {}", addr, e);
        }
    }

    /// Queue a message for one client
    fn queue_for(&mut self, addr: SocketAddr, msg: ServerMessage) {
        if let Some(client) = self.clients.get_mut(&addr) {
            client.outgoing_queue.push(msg);
        }
    }
}
