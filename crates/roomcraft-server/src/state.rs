//! Shared application state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use roomcraft_agent::ProcurementSource;
use roomcraft_core::{Design, DesignId, Room, RoomId};
use roomcraft_provider::AiProvider;

use crate::config::Config;
use crate::scheduler::RenderScheduler;
use crate::store::MemoryJobStore;

/// Shared application state.
pub struct AppState {
    /// Server configuration.
    pub config: Config,

    /// Uploaded rooms indexed by RoomId.
    pub rooms: RwLock<HashMap<RoomId, Room>>,

    /// Generated designs indexed by DesignId.
    pub designs: RwLock<HashMap<DesignId, Design>>,

    /// Render job orchestration.
    pub scheduler: RenderScheduler,

    /// Opaque AI provider for analysis, generation, and rendering.
    pub provider: Arc<dyn AiProvider>,

    /// Per-step lookup backing procurement sessions.
    pub procurement: Arc<dyn ProcurementSource>,
}

impl AppState {
    /// Create a new AppState wrapped in Arc.
    pub fn new(
        config: Config,
        provider: Arc<dyn AiProvider>,
        procurement: Arc<dyn ProcurementSource>,
    ) -> Arc<Self> {
        let scheduler = RenderScheduler::new(
            Arc::new(MemoryJobStore::new()),
            Arc::clone(&provider),
            config.renders_dir(),
            config.public_url.clone(),
            config.render_timeout,
        );
        Arc::new(Self {
            config,
            rooms: RwLock::new(HashMap::new()),
            designs: RwLock::new(HashMap::new()),
            scheduler,
            provider,
            procurement,
        })
    }

    /// Snapshot of a room by id.
    pub async fn room(&self, id: &RoomId) -> Option<Room> {
        self.rooms.read().await.get(id).cloned()
    }

    /// Snapshot of a design by id.
    pub async fn design(&self, id: &DesignId) -> Option<Design> {
        self.designs.read().await.get(id).cloned()
    }

    /// Store a room record.
    pub async fn insert_room(&self, room: Room) {
        self.rooms.write().await.insert(room.id.clone(), room);
    }

    /// Store a design record.
    pub async fn insert_design(&self, design: Design) {
        self.designs.write().await.insert(design.id.clone(), design);
    }
}
