//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use liftoff_server::{
    domain::ChatMessage, infrastructure::dto::websocket::RoundEventMessage,
};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{
    api::RoundApi,
    command::{HELP, Input, parse_input},
    error::ClientError,
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// How a session ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The input channel closed (Ctrl+C / Ctrl+D)
    UserExit,
}

/// Run one WebSocket session until the user exits or the connection is lost.
pub async fn run_client_session(
    url: &str,
    name: &str,
    api: &RoundApi,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<SessionEnd, ClientError> {
    let (ws_stream, _response) = match connect_async(url).await {
        Ok(result) => result,
        Err(tungstenite::Error::Url(e)) => return Err(ClientError::InvalidUrl(e.to_string())),
        Err(e) => return Err(ClientError::ConnectionError(e.to_string())),
    };

    tracing::info!("Connected to round server!");
    println!(
        "\nYou are '{}'. Type messages and press Enter to send, /help for commands. Press Ctrl+C to exit.\n",
        name
    );
    redisplay_prompt(name);

    let (mut write, mut read) = ws_stream.split();

    let name_for_read = name.to_string();

    // Spawn a task to handle incoming messages
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    if let Ok(event) = serde_json::from_str::<RoundEventMessage>(&text) {
                        if let Some(formatted) = MessageFormatter::format_round_event(&event) {
                            print!("{}", formatted);
                            redisplay_prompt(&name_for_read);
                        }
                    } else if let Ok(chat) = ChatMessage::from_wire(&text) {
                        let formatted = MessageFormatter::format_chat_message(
                            &chat.sender,
                            &chat.body,
                            &name_for_read,
                        );
                        print!("{}", formatted);
                        redisplay_prompt(&name_for_read);
                    } else {
                        print!("{}", MessageFormatter::format_raw_message(&text));
                        redisplay_prompt(&name_for_read);
                    }
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(&name_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    loop {
        tokio::select! {
            _ = &mut read_task => {
                return Err(ClientError::ConnectionLost("server closed the stream".to_string()));
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    read_task.abort();
                    let _ = write.close().await;
                    return Ok(SessionEnd::UserExit);
                };
                if let Err(e) = handle_line(&line, name, api, &mut write).await {
                    if matches!(e, ClientError::ConnectionLost(_)) {
                        read_task.abort();
                        return Err(e);
                    }
                    println!("{}", e);
                }
                redisplay_prompt(name);
            }
        }
    }
}

async fn handle_line(
    line: &str,
    name: &str,
    api: &RoundApi,
    write: &mut WsSink,
) -> Result<(), ClientError> {
    match parse_input(line)? {
        Input::Chat(body) => {
            let json = ChatMessage::new(name, body)
                .to_wire()
                .map_err(|e| ClientError::InvalidCommand(e.to_string()))?;
            write
                .send(Message::Text(json.into()))
                .await
                .map_err(|e| ClientError::ConnectionLost(e.to_string()))?;
        }
        Input::Start {
            wager,
            cash_out_target,
        } => {
            let state = api.start(wager, cash_out_target).await?;
            print!("{}", MessageFormatter::format_state(&state));
        }
        Input::Reset => {
            let state = api.reset().await?;
            print!("{}", MessageFormatter::format_state(&state));
        }
        Input::Speed(factor) => {
            let state = api.set_speed(factor).await?;
            print!("{}", MessageFormatter::format_state(&state));
        }
        Input::State => {
            let state = api.state().await?;
            print!("{}", MessageFormatter::format_state(&state));
        }
        Input::Ranking => {
            let ranking = api.ranking().await?;
            print!("{}", MessageFormatter::format_ranking(&ranking));
        }
        Input::Help => println!("{}", HELP),
    }
    Ok(())
}
