use tracing::debug;

use super::{Game, Scheduler};
use crate::domain::state::PlayerId;
use crate::protocol::events::ClientMsg;
use crate::services::registry::Outbox;

impl<H: Outbox> Game<H> {
    /// Map an inbound client event onto the round controller.
    ///
    /// Out-of-state requests are dropped; nothing here is reported back to
    /// the sender as a failure.
    pub fn handle_client_msg(&mut self, sched: &mut dyn Scheduler, from: PlayerId, msg: ClientMsg) {
        match msg {
            ClientMsg::StartGame => {
                if let Err(err) = self.start_round(sched) {
                    debug!(player_id = %from, error = %err, "start_game ignored");
                }
            }
            ClientMsg::Draw(payload) => {
                if !self.forward_drawing(sched, from, payload) {
                    debug!(player_id = %from, "draw from non-drawer dropped");
                }
            }
            ClientMsg::Clear => {
                if !self.clear_canvas(sched, from) {
                    debug!(player_id = %from, "clear from non-drawer dropped");
                }
            }
            ClientMsg::Guess { message } => {
                if !self.receive_guess(sched, from, &message) {
                    self.post_chat(sched, from, &message);
                }
            }
        }
    }
}
