use payday::{
    ChatId, DestinationStore, Messenger, NewWorker, RecordStore, SendError, StoreError,
    WorkerRecord,
};
use payday_web::{AppState, router};
use std::sync::{Arc, Mutex};

struct MemStore(Mutex<Vec<NewWorker>>);

impl RecordStore for MemStore {
    async fn read_all(&self) -> Result<Vec<WorkerRecord>, StoreError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .enumerate()
            .map(|(i, w)| WorkerRecord {
                row: i as u32 + 1,
                full_name: w.full_name.clone(),
                phone: w.phone.clone(),
                bank: w.bank.clone(),
                receiver: w.receiver.clone(),
            })
            .collect())
    }

    async fn append_worker(&self, worker: &NewWorker) -> Result<u32, StoreError> {
        let mut rows = self.0.lock().unwrap();
        rows.push(worker.clone());
        Ok(rows.len() as u32)
    }
}

#[derive(Clone, Default)]
struct RecordingMessenger {
    sent: Arc<Mutex<Vec<(ChatId, String)>>>,
}

impl Messenger for RecordingMessenger {
    async fn send_message(&self, chat: ChatId, text: &str) -> Result<(), SendError> {
        self.sent.lock().unwrap().push((chat, text.to_owned()));
        Ok(())
    }
}

struct MemDestination(Mutex<Option<ChatId>>);

impl DestinationStore for MemDestination {
    fn load(&self) -> Result<Option<ChatId>, StoreError> {
        Ok(*self.0.lock().unwrap())
    }

    fn save(&self, chat: ChatId) -> Result<(), StoreError> {
        *self.0.lock().unwrap() = Some(chat);
        Ok(())
    }
}

fn update(chat: i64, text: &str) -> serde_json::Value {
    serde_json::json!({
        "update_id": 1,
        "message": {
            "message_id": 10,
            "chat": { "id": chat },
            "text": text,
        }
    })
}

#[tokio::test]
async fn webhook_workflow() {
    let messenger = RecordingMessenger::default();
    let state = AppState::new(
        MemStore(Mutex::new(Vec::new())),
        messenger.clone(),
        MemDestination(Mutex::new(None)),
        chrono_tz::Europe::Moscow,
    );
    let destination = Arc::clone(&state.destination);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.ok();
    });

    let client = reqwest::Client::new();
    let post = |body: serde_json::Value| {
        let client = client.clone();
        let url = format!("{base}/webhook");
        async move {
            client
                .post(url)
                .json(&body)
                .send()
                .await
                .expect("webhook request failed")
        }
    };

    // Registration message appends a row and replies with the assigned id.
    let response = post(update(100, "ФИО Иванов Петр\nТелефон 89112223344\nБанк Тинькофф")).await;
    assert_eq!(response.status().as_u16(), 200);
    {
        let sent = messenger.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, 100);
        assert_eq!(sent[0].1, "Вы успешно добавлены!\nВаш ID: 1");
    }

    // Payment referencing the worker by partial name, then by row id.
    post(update(100, "/pay иванов 500 1 1200")).await;
    {
        let sent = messenger.sent.lock().unwrap();
        assert_eq!(sent.last().unwrap().1, "Записано выплат: 2");
    }

    // The ledger reply lists both entries and does not clear them.
    post(update(100, "/list")).await;
    {
        let sent = messenger.sent.lock().unwrap();
        let reply = &sent.last().unwrap().1;
        assert!(reply.starts_with("Выплаты за "));
        assert_eq!(reply.matches("Иванов Петр").count(), 2);
    }

    // /setchat persists the calling chat as the flush destination.
    post(update(-200, "/setchat")).await;
    assert_eq!(destination.load().unwrap(), Some(-200));

    // Updates without a text message are acknowledged and dropped.
    let response = post(serde_json::json!({ "update_id": 2 })).await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(messenger.sent.lock().unwrap().len(), 4);
}
