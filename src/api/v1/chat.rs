//! Chat completions endpoint handler

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::{
    sse::{Event, KeepAlive, Sse},
    IntoResponse, Response,
};
use futures::stream::Stream;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatCompletionStreamResponse, Json,
    Usage,
};
use crate::domain::{flatten_conversation, InvokeOptions, Message};

/// Pacing delay between emitted stream chunks, approximating live typing.
const STREAM_CHUNK_DELAY: Duration = Duration::from_millis(20);

/// POST /v1/chat/completions
pub async fn create_chat_completion(
    State(state): State<AppState>,
    Json(request): Json<ChatCompletionRequest>,
) -> Result<Response, ApiError> {
    let request_id = format!("chatcmpl-{}", Uuid::new_v4());

    info!(
        request_id = %request_id,
        model = %request.model,
        stream = request.stream,
        messages = request.messages.len(),
        "Processing chat completion request"
    );

    if request.messages.is_empty() {
        return Err(ApiError::bad_request("Messages cannot be empty").with_param("messages"));
    }

    let messages: Vec<Message> = request.messages.iter().map(|m| m.to_domain()).collect();
    let options = request.claude_options.clone().unwrap_or_default();

    if request.stream {
        let stream =
            create_stream_response(state, messages, options, request.model.clone(), request_id);
        Ok(Sse::new(stream)
            .keep_alive(KeepAlive::default())
            .into_response())
    } else {
        match state
            .dispatcher
            .dispatch(&messages, &options, &request.model)
            .await
        {
            Ok(outcome) => {
                info!(
                    request_id = %request_id,
                    source = %outcome.source,
                    chars = outcome.text.len(),
                    "Completion succeeded"
                );

                let prompt = flatten_conversation(&messages);
                let usage = Usage::from_texts(&prompt, &outcome.text);
                let response =
                    ChatCompletionResponse::new(&request.model, &request_id, outcome.text, usage);

                Ok(Json(response).into_response())
            }
            Err(err) => {
                // Detail stays in the logs; the client sees a generic error.
                error!(request_id = %request_id, error = %err, "All completion backends failed");
                Err(err.into())
            }
        }
    }
}

/// Build the full chunk sequence for a completed response text: one
/// role-announce chunk, one chunk per whitespace-split word (each with a
/// trailing space), and a terminal finish chunk. The `[DONE]` sentinel is
/// appended at the transport layer.
fn build_stream_chunks(
    model: &str,
    request_id: &str,
    text: &str,
) -> Vec<ChatCompletionStreamResponse> {
    let mut chunks = vec![ChatCompletionStreamResponse::initial(model, request_id)];

    for word in text.split_whitespace() {
        chunks.push(ChatCompletionStreamResponse::content(
            model,
            request_id,
            &format!("{word} "),
        ));
    }

    chunks.push(ChatCompletionStreamResponse::finish(model, request_id));
    chunks
}

/// Emulate streaming: resolve the completion synchronously, then emit the
/// chunk sequence with pacing delays. A dispatch failure aborts before any
/// chunk is emitted; a client disconnect stops remaining emission.
fn create_stream_response(
    state: AppState,
    messages: Vec<Message>,
    options: InvokeOptions,
    model: String,
    request_id: String,
) -> impl Stream<Item = Result<Event, Infallible>> {
    let (tx, rx) = tokio::sync::mpsc::channel::<Result<Event, Infallible>>(32);

    tokio::spawn(async move {
        let outcome = match state.dispatcher.dispatch(&messages, &options, &model).await {
            Ok(outcome) => outcome,
            Err(err) => {
                // Nothing has been sent yet; the stream just ends.
                error!(request_id = %request_id, error = %err, "Streaming completion failed");
                return;
            }
        };

        info!(
            request_id = %request_id,
            source = %outcome.source,
            chars = outcome.text.len(),
            "Streaming completion succeeded"
        );

        for chunk in build_stream_chunks(&model, &request_id, &outcome.text) {
            let data = serde_json::to_string(&chunk).unwrap();
            if tx.send(Ok(Event::default().data(data))).await.is_err() {
                // Client went away; sent chunks remain valid partial output.
                return;
            }

            if chunk.has_content() {
                tokio::time::sleep(STREAM_CHUNK_DELAY).await;
            }
        }

        let _ = tx.send(Ok(Event::default().data("[DONE]"))).await;
    });

    ReceiverStream::new(rx)
}
