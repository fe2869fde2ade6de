//! Service-level tests: the domain service and its in-process client.

use std::sync::Arc;

use tickets::{
    contract::{
        client::TicketsApi,
        error::TicketsError,
        model::{NewTicket, TicketPatch},
    },
    domain::{
        error::DomainError,
        seed::demo_tickets,
        service::{Service, ServiceConfig},
    },
    gateways::local::TicketsLocalClient,
};

fn new_ticket(name: &str, description: &str) -> NewTicket {
    NewTicket {
        name: name.to_owned(),
        description: description.to_owned(),
        method: Some("createTicket".to_owned()),
    }
}

fn create_test_client() -> (Arc<Service>, Arc<dyn TicketsApi>) {
    let service = Arc::new(Service::default());
    let client: Arc<dyn TicketsApi> = Arc::new(TicketsLocalClient::new(service.clone()));
    (service, client)
}

#[test]
fn printer_scenario() {
    let svc = Service::default();

    let list = svc
        .create_ticket(new_ticket("Printer broken", "Floor 3"))
        .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "Printer broken");
    assert!(!list[0].status);
    let id = list[0].id.to_string();

    let json = serde_json::to_value(&list).unwrap();
    assert!(json[0].get("description").is_none());

    assert_eq!(svc.get_description(&id).unwrap(), "Floor 3");

    svc.update_ticket(
        &id,
        TicketPatch {
            status: Some(true),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(svc.list_tickets()[0].status);
    assert!(svc.get_ticket(&id).unwrap().status);

    svc.delete_ticket(&id).unwrap();
    assert!(svc.list_tickets().is_empty());
    assert!(matches!(
        svc.get_description(&id),
        Err(DomainError::TicketNotFound { .. })
    ));
}

#[test]
fn failed_create_does_not_grow_store() {
    let svc = Service::default();
    assert!(svc.create_ticket(new_ticket("", "Floor 3")).is_err());
    assert!(svc.create_ticket(new_ticket("Printer", "  ")).is_err());
    assert!(svc.is_empty());
}

#[test]
fn required_tag_policy() {
    let svc = Service::new(ServiceConfig {
        require_operation_tag: true,
    });
    let untagged = NewTicket {
        method: None,
        ..new_ticket("a", "b")
    };
    assert_eq!(
        svc.create_ticket(untagged).unwrap_err(),
        DomainError::invalid_method(None)
    );
    assert!(svc.create_ticket(new_ticket("a", "b")).is_ok());
    assert_eq!(svc.len(), 1);
}

#[test]
fn seeded_service_lists_demo_tickets() {
    let seed = demo_tickets().unwrap();
    let svc = Service::with_tickets(seed.clone(), ServiceConfig::default());

    let list = svc.list_tickets();
    assert_eq!(list.len(), seed.len());
    for (short, full) in list.iter().zip(&seed) {
        assert_eq!(short, &full.short());
    }
}

#[test]
fn concurrent_creates_are_all_recorded() {
    let svc = Arc::new(Service::default());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let svc = svc.clone();
            std::thread::spawn(move || {
                for j in 0..25 {
                    svc.create_ticket(new_ticket(&format!("t{i}-{j}"), "d"))
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let list = svc.list_tickets();
    assert_eq!(list.len(), 200);
    let mut ids: Vec<_> = list.iter().map(|t| t.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 200);
}

#[tokio::test]
async fn local_client_round_trip() {
    let (service, client) = create_test_client();

    let list = client
        .create_ticket(new_ticket("VPN", "Cannot connect"))
        .await
        .unwrap();
    let id = list[0].id.to_string();

    let ticket = client.get_ticket(&id).await.unwrap();
    assert_eq!(ticket.description, "Cannot connect");

    client
        .update_ticket(
            &id,
            TicketPatch {
                description: Some("Fixed after reboot".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(
        service.get_description(&id).unwrap(),
        "Fixed after reboot"
    );

    client.delete_ticket(&id).await.unwrap();
    client.delete_ticket(&id).await.unwrap();
    assert!(client.list_tickets().await.unwrap().is_empty());
}

#[tokio::test]
async fn local_client_maps_errors() {
    let (_service, client) = create_test_client();

    let err = client.get_ticket(&uuid_like()).await.unwrap_err();
    assert!(matches!(err, TicketsError::NotFound { .. }));

    let err = client.get_ticket("").await.unwrap_err();
    assert_eq!(err, TicketsError::validation("Id is required"));

    let err = client
        .create_ticket(NewTicket::default())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TicketsError::validation("Name and description are required")
    );

    // Unknown ids are ignored by update and delete.
    assert!(client
        .update_ticket(&uuid_like(), TicketPatch::default())
        .await
        .is_ok());
    assert!(client.delete_ticket("no-such-ticket").await.is_ok());
}

fn uuid_like() -> String {
    "7f9c2ba4-e88f-4d8a-9c3f-2a8e4f1b6c10".to_owned()
}
