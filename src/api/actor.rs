//! API actor: runs remote calls off the UI task and reports results as events.
//!
//! Every command is executed on its own task, so completions can arrive in any
//! order. Each event carries the tag it was issued with (page request, search
//! ticket, thread id) so the app can drop responses that are no longer current.

use futures::future::join;
use tokio::sync::mpsc;

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{
    AiAnalysis, Contact, IgnoreEntry, IgnoreId, IgnoreItem, ImportSummary, Message, SearchHit,
    Stats, ThreadId,
};
use crate::actor::{RetryConfig, with_retry};
use crate::constants::API_CHANNEL_CAPACITY;
use crate::contacts::PageRequest;
use crate::ignore::IgnoreOrigin;
use crate::search::SearchTicket;

#[derive(Debug)]
pub enum ApiCommand {
    FetchStats,
    FetchContacts(PageRequest),
    Search(SearchTicket),
    /// Fetch messages and AI analysis for a thread concurrently
    OpenThread { thread_id: ThreadId },
    ListIgnore,
    AddIgnore {
        entry: IgnoreEntry,
        origin: IgnoreOrigin,
    },
    RemoveIgnore { id: IgnoreId },
    ImportIgnore { items: Vec<IgnoreEntry> },
    Shutdown,
}

#[derive(Debug)]
pub enum ApiEvent {
    Stats(Result<Stats, ApiError>),
    ContactsPage {
        request: PageRequest,
        result: Result<Vec<Contact>, ApiError>,
    },
    SearchResults {
        ticket: SearchTicket,
        result: Result<Vec<SearchHit>, ApiError>,
    },
    ThreadMessages {
        thread_id: ThreadId,
        result: Result<Vec<Message>, ApiError>,
    },
    ThreadSummary {
        thread_id: ThreadId,
        result: Result<AiAnalysis, ApiError>,
    },
    IgnoreList(Result<Vec<IgnoreItem>, ApiError>),
    IgnoreAdded {
        entry: IgnoreEntry,
        origin: IgnoreOrigin,
        result: Result<IgnoreItem, ApiError>,
    },
    IgnoreRemoved {
        id: IgnoreId,
        result: Result<(), ApiError>,
    },
    IgnoreImported {
        items: Vec<IgnoreEntry>,
        result: Result<ImportSummary, ApiError>,
    },
}

pub struct ApiActorHandle {
    pub cmd_tx: mpsc::Sender<ApiCommand>,
    pub event_rx: mpsc::Receiver<ApiEvent>,
}

impl ApiActorHandle {
    /// Queue a command without waiting. A command the actor could not take
    /// (gone or backed up) is handed back.
    pub fn send(&self, cmd: ApiCommand) -> Result<(), ApiCommand> {
        self.cmd_tx.try_send(cmd).map_err(|e| {
            tracing::error!("API actor unavailable: {}", e);
            e.into_inner()
        })
    }
}

pub fn spawn_api_actor(
    client: ApiClient,
    retry: RetryConfig,
    search_limit: usize,
) -> ApiActorHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel(API_CHANNEL_CAPACITY);
    let (event_tx, event_rx) = mpsc::channel(API_CHANNEL_CAPACITY);

    tokio::spawn(api_actor_loop(client, retry, search_limit, cmd_rx, event_tx));

    ApiActorHandle { cmd_tx, event_rx }
}

async fn api_actor_loop(
    client: ApiClient,
    retry: RetryConfig,
    search_limit: usize,
    mut cmd_rx: mpsc::Receiver<ApiCommand>,
    event_tx: mpsc::Sender<ApiEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        if matches!(cmd, ApiCommand::Shutdown) {
            break;
        }
        if event_tx.is_closed() {
            tracing::warn!("API actor: event receiver dropped");
            break;
        }

        let client = client.clone();
        let retry = retry.clone();
        let event_tx = event_tx.clone();
        tokio::spawn(async move {
            execute(&client, &retry, search_limit, cmd, &event_tx).await;
        });
    }
    tracing::debug!("API actor stopped");
}

async fn execute(
    client: &ApiClient,
    retry: &RetryConfig,
    search_limit: usize,
    cmd: ApiCommand,
    event_tx: &mpsc::Sender<ApiEvent>,
) {
    match cmd {
        ApiCommand::FetchStats => {
            let result = with_retry(retry, || client.stats()).await;
            emit(event_tx, ApiEvent::Stats(result)).await;
        }

        ApiCommand::FetchContacts(request) => {
            let result =
                with_retry(retry, || client.contacts(request.limit, request.offset)).await;
            emit(event_tx, ApiEvent::ContactsPage { request, result }).await;
        }

        ApiCommand::Search(ticket) => {
            let result = with_retry(retry, || client.search(&ticket.query, search_limit)).await;
            emit(event_tx, ApiEvent::SearchResults { ticket, result }).await;
        }

        ApiCommand::OpenThread { thread_id } => {
            // Independent fetches: whichever finishes first is reported first
            let messages = async {
                let result = with_retry(retry, || client.thread_messages(thread_id)).await;
                emit(event_tx, ApiEvent::ThreadMessages { thread_id, result }).await;
            };
            let summary = async {
                let result = with_retry(retry, || client.thread_summary(thread_id)).await;
                emit(event_tx, ApiEvent::ThreadSummary { thread_id, result }).await;
            };
            join(messages, summary).await;
        }

        ApiCommand::ListIgnore => {
            let result = with_retry(retry, || client.ignore_list()).await;
            emit(event_tx, ApiEvent::IgnoreList(result)).await;
        }

        ApiCommand::AddIgnore { entry, origin } => {
            let result = client.add_ignore(&entry).await;
            emit(
                event_tx,
                ApiEvent::IgnoreAdded {
                    entry,
                    origin,
                    result,
                },
            )
            .await;
        }

        ApiCommand::RemoveIgnore { id } => {
            let result = client.remove_ignore(id).await;
            emit(event_tx, ApiEvent::IgnoreRemoved { id, result }).await;
        }

        ApiCommand::ImportIgnore { items } => {
            let result = client.import_ignore(&items).await;
            emit(event_tx, ApiEvent::IgnoreImported { items, result }).await;
        }

        ApiCommand::Shutdown => {}
    }
}

async fn emit(event_tx: &mpsc::Sender<ApiEvent>, event: ApiEvent) {
    if event_tx.send(event).await.is_err() {
        tracing::warn!("API actor: event receiver dropped");
    }
}
