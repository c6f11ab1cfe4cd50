use super::controller::{Action, Board, Command};
use super::view::BoardView;
use crate::client::{ClientError, FeatureClient};
use crate::models::{CreateFeatureInput, UpdateFeatureInput};

/// A [`Board`] whose commands go to the REST backend.
///
/// Every successful mutation is followed by a full re-fetch; the view is
/// always rendered from the latest applied snapshot. A failed request
/// leaves the last snapshot in place.
#[derive(Debug)]
pub struct RemoteBoard {
    client: FeatureClient,
    board: Board,
}

impl RemoteBoard {
    pub fn new(client: FeatureClient) -> Self {
        Self::with_board(client, Board::new())
    }

    pub fn with_board(client: FeatureClient, board: Board) -> Self {
        Self { client, board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn view(&self) -> BoardView {
        self.board.view()
    }

    /// Fetch the full collection and apply it if still current.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let ticket = self.board.begin_fetch();
        let features = self.client.list_features().await?;
        let count = features.len();
        if self.board.apply_snapshot(ticket, features) {
            tracing::debug!("Applied snapshot with {} features", count);
        }
        Ok(())
    }

    pub async fn handle(&mut self, action: Action) -> Result<(), ClientError> {
        let Some(command) = self.board.interpret(action) else {
            return Ok(());
        };
        self.send(command).await?;
        self.refresh().await
    }

    /// Handle actions in order, stopping at the first failed request.
    ///
    /// Actions before the failure stay applied; the board keeps the last
    /// snapshot.
    pub async fn handle_all(
        &mut self,
        actions: impl IntoIterator<Item = Action>,
    ) -> Result<(), ClientError> {
        for action in actions {
            self.handle(action).await?;
        }
        Ok(())
    }

    async fn send(&mut self, command: Command) -> Result<(), ClientError> {
        let result = match command {
            Command::Create { title, description } => self
                .client
                .create_feature(&CreateFeatureInput {
                    title,
                    description: Some(description),
                })
                .await
                .map(|_| ()),
            Command::Update {
                id,
                title,
                description,
            } => self
                .client
                .update_feature(id, &UpdateFeatureInput::content(title, description))
                .await
                .map(|_| ()),
            Command::Delete(id) => self.client.delete_feature(id).await,
            Command::SetStatus { id, status } => {
                let completes = self.board.would_complete(id, status);
                let result = self
                    .client
                    .update_feature(id, &UpdateFeatureInput::status(status))
                    .await
                    .map(|_| ());
                if result.is_ok() && completes {
                    self.board.celebration().trigger();
                }
                result
            }
        };

        if let Err(e) = &result {
            tracing::warn!("Request failed, keeping last snapshot: {}", e);
        }
        result
    }
}
