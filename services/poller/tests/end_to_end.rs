//! Login, status query and decode against a stub gateway

use std::time::Duration;

use codec::{calculate_quoted_crc32, format_checksum};
use config::{password_digest, Credentials};
use mockito::{Matcher, Server};
use network::HttpTransport;
use poller::{RecordingSleeper, StatusPoller};
use serde_json::json;
use tempfile::tempdir;

const LOGIN: &str = "/hes-gateway/terminal/initialize/appUserOrInstallerLogin";
const SEND: &str = "/hes-gateway/terminal/sendMqtt";
const DEVICE: &str = "10060005A02X0000";
const TOKEN: &str = "APP_ACCOUNT:0f1e2d3c";

const SITE_REPORT: &str = r#"{"report_type":1,"mode":2,"run_status":5,"fhpSn":["10050012A0010001"],"p_uti":0.855,"p_sun":0.000,"p_gen":0.000,"p_fhp":-0.050,"p_load":0.805,"kwh_load":1790.5,"soc":99.474,"fhpSoc":[99.474],"fhpPower":[-0.05],"signal":-67,"connType":1,"name":"Home"}"#;

fn status_body(data_area: &str) -> String {
    json!({
        "code": 200,
        "message": "Query success!",
        "result": {
            "cmdType": 203,
            "equipNo": DEVICE,
            "type": 0,
            "timeStamp": 1_700_000_000,
            "snno": 1,
            "len": data_area.len(),
            "crc": format_checksum(calculate_quoted_crc32(data_area).unwrap()),
            "dataArea": data_area,
        },
        "total": 1,
        "success": true,
    })
    .to_string()
}

async fn login_mock(server: &mut Server) -> mockito::Mock {
    server
        .mock("POST", LOGIN)
        .match_body(Matcher::UrlEncoded("account".into(), "owner@example.com".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "code": 200,
                "message": "Query success!",
                "result": {"userId": 4711, "email": "owner@example.com", "token": TOKEN},
                "total": 1,
                "success": true,
            })
            .to_string(),
        )
        .create_async()
        .await
}

fn status_query_matcher() -> Matcher {
    Matcher::PartialJson(json!({
        "lang": "EN_US",
        "cmdType": 203,
        "equipNo": DEVICE,
        "type": 0,
        "snno": 1,
        "len": 25,
        "crc": "6FC3A6BF",
        "dataArea": {"opt": 1, "refreshData": 1},
    }))
}

fn credentials() -> Credentials {
    Credentials {
        email: "owner@example.com".to_string(),
        devices: vec![DEVICE.to_string()],
        password: password_digest("hunter2"),
    }
}

#[tokio::test]
async fn test_saved_credentials_to_decoded_status() {
    let mut server = Server::new_async().await;
    let login = login_mock(&mut server).await;
    let send = server
        .mock("POST", SEND)
        .match_header("loginToken", TOKEN)
        .match_header("content-type", "application/json")
        .match_body(status_query_matcher())
        .with_status(200)
        .with_body(status_body(SITE_REPORT))
        .expect(1)
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let path = dir.path().join("benwh.config");
    credentials().save(&path).unwrap();
    let loaded = Credentials::load(&path).unwrap();

    let session = HttpTransport::with_base_url(&server.url())
        .unwrap()
        .authenticate(&loaded)
        .await
        .unwrap();
    let mut poller =
        StatusPoller::with_sleeper(session, RecordingSleeper::new(), Duration::from_secs(5));

    let record = poller.poll().await.unwrap();

    assert_eq!(record.p_uti, 0.855);
    assert_eq!(record.p_sun, 0.000);
    assert_eq!(record.p_gen, 0.000);
    assert_eq!(record.p_fhp, -0.050);
    assert_eq!(record.p_load, 0.805);
    assert_eq!(record.soc, 99.474);
    assert!(poller.sleeper().waits().is_empty());

    login.assert_async().await;
    send.assert_async().await;
}

#[tokio::test]
async fn test_retry_later_over_http() {
    let mut server = Server::new_async().await;
    let _login = login_mock(&mut server).await;
    let busy = server
        .mock("POST", SEND)
        .with_status(200)
        .with_body(r#"{"code":102,"message":"Device busy","result":null,"total":0,"success":false}"#)
        .expect(1)
        .create_async()
        .await;

    let session = HttpTransport::with_base_url(&server.url())
        .unwrap()
        .authenticate(&credentials())
        .await
        .unwrap();
    let mut poller =
        StatusPoller::with_sleeper(session, RecordingSleeper::new(), Duration::from_secs(5));

    // Single busy reply, then the stub answers with a status report
    let ready = server
        .mock("POST", SEND)
        .with_status(200)
        .with_body(status_body(SITE_REPORT))
        .create_async()
        .await;

    let record = poller.poll().await.unwrap();

    assert_eq!(record.soc, 99.474);
    assert_eq!(poller.sleeper().waits(), vec![Duration::from_secs(5)]);
    busy.assert_async().await;
    ready.assert_async().await;
}

#[tokio::test]
async fn test_consecutive_queries_decode_their_own_reply() {
    let mut server = Server::new_async().await;
    let _login = login_mock(&mut server).await;

    let session = HttpTransport::with_base_url(&server.url())
        .unwrap()
        .authenticate(&credentials())
        .await
        .unwrap();
    let mut poller =
        StatusPoller::with_sleeper(session, RecordingSleeper::new(), Duration::from_secs(5));

    let first = server
        .mock("POST", SEND)
        .with_status(200)
        .with_body(status_body(SITE_REPORT))
        .create_async()
        .await;
    let a = poller.poll().await.unwrap();
    first.remove_async().await;

    let evening = SITE_REPORT
        .replace("\"p_sun\":0.000", "\"p_sun\":1.250")
        .replace("\"soc\":99.474", "\"soc\":87.125");
    let second = server
        .mock("POST", SEND)
        .with_status(200)
        .with_body(status_body(&evening))
        .create_async()
        .await;
    let b = poller.poll().await.unwrap();

    assert_eq!((a.p_sun, a.soc), (0.0, 99.474));
    assert_eq!((b.p_sun, b.soc), (1.25, 87.125));
    assert_eq!(poller.attempts(), 2);
    second.assert_async().await;
}
