//! Shared test doubles: an in-memory bus and a recording sink.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use btplayer_bridge::{
    config::BusConfig,
    services::{
        SnapshotSink,
        bluez::{BusError, BusGateway, PlayerLocator, PropertyValue, StateReader},
    },
    state::Snapshot,
};

pub const ROOT: &str = "/org/bluez";
pub const INTERFACE: &str = "org.bluez.MediaPlayer1";

#[derive(Default)]
struct Tree {
    children: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    properties: HashMap<String, HashMap<String, PropertyValue>>,
    introspected: Vec<String>,
    fetched: Vec<String>,
}

/// Object tree answering introspection and property reads from memory.
#[derive(Default)]
pub struct FakeBus {
    tree: Mutex<Tree>,
}

impl FakeBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_children(&self, path: &str, names: &[&str]) {
        let mut tree = self.tree.lock().unwrap();
        tree.children.insert(
            path.to_string(),
            names.iter().map(|name| name.to_string()).collect(),
        );
    }

    /// Adds `/org/bluez/<adapter>/<device>/<player>` and returns its path.
    pub fn add_player(&self, adapter: &str, device: &str, player: &str) -> String {
        let adapter_path = format!("{ROOT}/{adapter}");
        let device_path = format!("{adapter_path}/{device}");
        let player_path = format!("{device_path}/{player}");

        let mut tree = self.tree.lock().unwrap();
        push_unique(&mut tree.children, ROOT, adapter);
        push_unique(&mut tree.children, &adapter_path, device);
        push_unique(&mut tree.children, &device_path, player);
        tree.children.entry(player_path.clone()).or_default();

        player_path
    }

    /// Drops the player node and its properties.
    pub fn remove_player(&self, player_path: &str) {
        let mut tree = self.tree.lock().unwrap();
        if let Some((parent, name)) = player_path.rsplit_once('/') {
            if let Some(children) = tree.children.get_mut(parent) {
                children.retain(|child| child != name);
            }
        }
        tree.children.remove(player_path);
        tree.properties.remove(player_path);
    }

    /// Makes introspection of `path` fail.
    pub fn fail_path(&self, path: &str) {
        self.tree.lock().unwrap().failing.insert(path.to_string());
    }

    pub fn set_property(&self, path: &str, name: &str, value: PropertyValue) {
        let mut tree = self.tree.lock().unwrap();
        tree.properties
            .entry(path.to_string())
            .or_default()
            .insert(name.to_string(), value);
    }

    pub fn set_state(
        &self,
        path: &str,
        status: &str,
        position_ms: u64,
        track: &[(&str, PropertyValue)],
    ) {
        self.set_property(path, "Status", PropertyValue::from(status));
        self.set_property(path, "Position", PropertyValue::UInt(position_ms));
        self.set_property(path, "Track", dict(track));
    }

    pub fn introspected(&self) -> Vec<String> {
        self.tree.lock().unwrap().introspected.clone()
    }

    pub fn fetched(&self) -> Vec<String> {
        self.tree.lock().unwrap().fetched.clone()
    }

    pub fn clear_log(&self) {
        let mut tree = self.tree.lock().unwrap();
        tree.introspected.clear();
        tree.fetched.clear();
    }
}

#[async_trait]
impl BusGateway for FakeBus {
    async fn list_children(&self, path: &str) -> Result<Vec<String>, BusError> {
        let mut tree = self.tree.lock().unwrap();
        tree.introspected.push(path.to_string());

        if tree.failing.contains(path) {
            return Err(BusError::NotFound(path.to_string()));
        }

        Ok(tree.children.get(path).cloned().unwrap_or_default())
    }

    async fn get_property(
        &self,
        path: &str,
        interface: &str,
        name: &str,
    ) -> Result<PropertyValue, BusError> {
        let mut tree = self.tree.lock().unwrap();
        tree.fetched.push(format!("{path}:{name}"));

        if interface != INTERFACE {
            return Err(BusError::NotFound(format!("{interface} on {path}")));
        }

        tree.properties
            .get(path)
            .and_then(|properties| properties.get(name))
            .cloned()
            .ok_or_else(|| BusError::NotFound(format!("{path} {name}")))
    }
}

fn push_unique(children: &mut HashMap<String, Vec<String>>, path: &str, name: &str) {
    let entry = children.entry(path.to_string()).or_default();
    if !entry.iter().any(|child| child == name) {
        entry.push(name.to_string());
    }
}

pub fn dict(entries: &[(&str, PropertyValue)]) -> PropertyValue {
    PropertyValue::Dict(
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect(),
    )
}

pub fn song(title: &str, artist: &str, duration_ms: u64) -> Vec<(&'static str, PropertyValue)> {
    vec![
        ("Title", PropertyValue::from(title)),
        ("Artist", PropertyValue::from(artist)),
        ("Album", PropertyValue::from("Album")),
        ("Duration", PropertyValue::UInt(duration_ms)),
    ]
}

pub fn locator(bus: &Arc<FakeBus>) -> PlayerLocator {
    let gateway: Arc<dyn BusGateway> = bus.clone();
    PlayerLocator::new(gateway, &BusConfig::default()).unwrap()
}

pub fn reader(bus: &Arc<FakeBus>) -> StateReader {
    let gateway: Arc<dyn BusGateway> = bus.clone();
    StateReader::new(gateway, INTERFACE)
}

/// Sink that remembers everything it was given.
#[derive(Default)]
pub struct RecordingSink {
    persisted: Mutex<Vec<Snapshot>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn persisted(&self) -> Vec<Snapshot> {
        self.persisted.lock().unwrap().clone()
    }
}

#[async_trait]
impl SnapshotSink for RecordingSink {
    async fn persist(&self, snapshot: &Snapshot) {
        self.persisted.lock().unwrap().push(snapshot.clone());
    }
}
