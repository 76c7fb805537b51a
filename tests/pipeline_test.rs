//! End-to-end cycle test: mocked Kismet upstream, mocked Elasticsearch
//! downstream, real everything in between.

use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;
use wids_extractor::{Collector, Config, SchemaLayout};

fn make_config(kismet_url: String, es_url: String) -> Config {
    Config {
        kismet_url,
        kismet_window_sec: 10,
        kismet_schema: None,
        es_url,
        es_index: "wids-wireless-features".to_string(),
        es_username: None,
        es_password: None,
        es_pipeline: None,
        es_verify_certs: true,
        sensor_id: "pi-01".to_string(),
        sensor_site: "lab".to_string(),
        poll_interval_sec: 10,
    }
}

#[tokio::test]
async fn test_full_cycle_nested_layout() {
    let mut kismet = Server::new_async().await;
    let _kmock = kismet
        .mock("GET", "/devices/last-time/-10/devices.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                {
                    "kismet.device.base": {
                        "macaddr": "AA:BB:CC:DD:EE:FF",
                        "name": "CoffeeShop_5G",
                        "manuf": "Ubiquiti",
                        "channel": 36,
                        "phyname": "IEEE802.11",
                        "first_time": 1700000000,
                        "last_time": 1700000600,
                        "num_clients": 4,
                        "signal": {
                            "kismet.common.signal.last": -52,
                            "kismet.common.signal.min": -71,
                            "kismet.common.signal.max": -48,
                            "kismet.common.signal.avg": -55.5
                        }
                    }
                },
                // SDR-style source with no MAC — must be dropped, not fatal
                { "kismet.device.base": { "name": "rtl433" } }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let mut es = Server::new_async().await;
    let bulk_mock = es
        .mock("POST", "/_bulk")
        .match_header("content-type", "application/x-ndjson")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""_index":"wids-wireless-features""#.to_string()),
            Matcher::Regex(r#""bssid":"AA:BB:CC:DD:EE:FF""#.to_string()),
            Matcher::Regex(r#""ssid":"CoffeeShop_5G""#.to_string()),
            Matcher::Regex(r#""sensor\.id":"pi-01""#.to_string()),
            Matcher::Regex(r#""client_count":4"#.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "took": 3,
                "errors": false,
                "items": [{"index": {"_index": "wids-wireless-features", "status": 201}}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let collector =
        Collector::new(Arc::new(make_config(kismet.url(), es.url()))).unwrap();
    let report = collector.run_cycle().await.unwrap();

    assert_eq!(report.fetched, 2);
    assert_eq!(report.indexed, 1);
    assert_eq!(report.dropped, 1);
    bulk_mock.assert_async().await;
}

#[tokio::test]
async fn test_full_cycle_flattened_layout_autodetected() {
    let mut kismet = Server::new_async().await;
    let _kmock = kismet
        .mock("GET", "/devices/last-time/-10/devices.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                {
                    "kismet.device.base.macaddr": "11:22:33:44:55:66",
                    "kismet.device.base.name": "HomeNet",
                    "kismet.device.base.channel": "11",
                    "kismet.common.signal.last": -60
                }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let mut es = Server::new_async().await;
    let bulk_mock = es
        .mock("POST", "/_bulk")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""bssid":"11:22:33:44:55:66""#.to_string()),
            // Channel typed as a string by the source stays a string
            Matcher::Regex(r#""channel":"11""#.to_string()),
            Matcher::Regex(r#""rssi_last":-60"#.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "took": 2,
                "errors": false,
                "items": [{"index": {"_index": "wids-wireless-features", "status": 201}}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let collector =
        Collector::new(Arc::new(make_config(kismet.url(), es.url()))).unwrap();
    let report = collector.run_cycle().await.unwrap();

    assert_eq!(report.indexed, 1);
    bulk_mock.assert_async().await;
}

#[tokio::test]
async fn test_pinned_layout_with_pipeline_and_auth() {
    let mut kismet = Server::new_async().await;
    let _kmock = kismet
        .mock("GET", "/devices/last-time/-10/devices.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([{ "kismet.device.base": { "macaddr": "AA:BB:CC:00:11:22" } }]).to_string(),
        )
        .create_async()
        .await;

    let mut es = Server::new_async().await;
    let bulk_mock = es
        .mock("POST", "/_bulk")
        .match_query(Matcher::UrlEncoded("pipeline".into(), "wids-enrich".into()))
        .match_header(
            "authorization",
            // "elastic:changeme" base64-encoded
            "Basic ZWxhc3RpYzpjaGFuZ2VtZQ==",
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "took": 2,
                "errors": false,
                "items": [{"index": {"_index": "wids-wireless-features", "status": 201}}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut config = make_config(kismet.url(), es.url());
    config.kismet_schema = Some(SchemaLayout::Nested);
    config.es_pipeline = Some("wids-enrich".to_string());
    config.es_username = Some("elastic".to_string());
    config.es_password = Some("changeme".to_string());

    let collector = Collector::new(Arc::new(config)).unwrap();
    let report = collector.run_cycle().await.unwrap();

    assert_eq!(report.indexed, 1);
    bulk_mock.assert_async().await;
}
