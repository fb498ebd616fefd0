//! Test: Route table maintenance against a cluster resource

use crate::helpers::*;
use fml_manager::cluster::{ClusterResource, EntryPointSettings, FileCluster, InMemoryCluster};
use fml_manager::core::{Document, Party, PartyType};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_remove_add_and_store() {
    let cluster = InMemoryCluster::with_resource(deployed_route_table());

    let mut route_table = cluster.get_route_table().await.unwrap();
    assert_eq!(route_table.len(), 3);

    // delete parties, one of them twice over
    route_table.remove_party(["9999", "8888", "8888"]);
    assert_eq!(route_table.len(), 1);

    // normal party
    let party = Party::new("9999", "192.168.2.2", 30010, PartyType::Normal);
    route_table.add_party([&party]);

    // exchange
    let exchange = Party::builder()
        .with_ip("192.168.2.2")
        .with_port(30009)
        .with_type(PartyType::Exchange)
        .build();
    route_table.add_party([&exchange]);

    cluster.set_route_table(&route_table).await.unwrap();

    assert_eq!(
        cluster.resource().await,
        json!({
            "route_table": {
                "10000": {
                    "default": [{"ip": "192.168.1.10", "port": 9370}],
                    "fateflow": [{"ip": "fateflow", "port": 9360}]
                },
                "9999": {"default": [{"ip": "192.168.2.2", "port": 30010}]},
                "default": {"default": [{"ip": "192.168.2.2", "port": 30009}]}
            },
            "permission": {"default_allow": true}
        })
    );
}

#[tokio::test]
async fn test_add_then_remove_is_identity() {
    let cluster = InMemoryCluster::with_resource(deployed_route_table());
    let mut route_table = cluster.get_route_table().await.unwrap();
    let before = route_table.get_party().clone();

    let party = Party::new("7777", "10.7.7.7", 30077, PartyType::Normal);
    route_table.add_party([&party]).remove_party([party.get_id()]);

    assert_eq!(route_table.get_party(), &before);
}

#[tokio::test]
async fn test_file_cluster_persists_between_instances() {
    let dir = temp_dir("file_cluster");
    let path = dir.join("fate-10000").join("route-table.json");

    let writer = FileCluster::new(&path, EntryPointSettings::default());
    let mut route_table = writer.get_route_table().await.unwrap();
    assert!(route_table.is_empty());

    route_table.merge_from(&deployed_route_table()).unwrap();
    writer.set_route_table(&route_table).await.unwrap();

    let reader = FileCluster::new(
        &path,
        EntryPointSettings {
            ip: "192.168.1.10".to_string(),
            port: 30010,
        },
    );
    let loaded = reader.get_route_table().await.unwrap();
    assert_eq!(loaded.to_dict(), deployed_route_table());
    assert_eq!(
        reader.get_entry_point().await.unwrap(),
        json!({"default": [{"ip": "192.168.1.10", "port": 30010}]})
    );

    std::fs::remove_dir_all(&dir).ok();
}
