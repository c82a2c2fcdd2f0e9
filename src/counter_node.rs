use crate::{
    msg::StringMsg,
    params::Params,
    reporter::{report_connections, ConnectionReport, TrackedEndpoint},
    runtime::{self, Node, Publisher, Subscription, Timer},
    time::TickDelta,
};
use anyhow::Result;
use futures::StreamExt;
use std::time::Duration;
use tracing::{debug, info};

/// One publisher, one subscription and one wall timer, all on the same topic.
pub struct CounterNode {
    name: String,
    params: Params,
    publisher: Publisher<StringMsg>,
    subscription: Subscription<StringMsg>,
    timer: Timer,
}

enum Event {
    Message(Option<StringMsg>),
    Tick(TickDelta),
}

impl CounterNode {
    pub fn new(node: &Node, params: &Params) -> Result<Self> {
        let Params { topic, qos, .. } = params;

        Ok(Self {
            name: node.name().to_string(),
            params: params.clone(),
            publisher: node.create_publisher(topic, *qos)?,
            subscription: node.subscribe(topic, *qos)?,
            timer: node.create_wall_timer(Duration::from_millis(params.report_period_millis))?,
        })
    }

    pub fn publisher(&self) -> &Publisher<StringMsg> {
        &self.publisher
    }

    pub fn subscription(&self) -> &Subscription<StringMsg> {
        &self.subscription
    }

    pub fn report(&self) -> Vec<ConnectionReport> {
        report_connections(&[
            TrackedEndpoint::new("Publisher", &self.publisher),
            TrackedEndpoint::new("Subscriber", &self.subscription),
            TrackedEndpoint::new("Timer", &self.timer),
        ])
    }

    /// Handles one timer tick. Returns the connection reports when reporting
    /// is enabled.
    pub fn on_tick(&self, delta: &TickDelta) -> runtime::Result<Option<Vec<ConnectionReport>>> {
        if delta.skipped() > 0 {
            debug!(skipped = delta.skipped(), tick = delta.tick, "timer fell behind");
        }
        if self.params.publish_on_tick {
            let msg = StringMsg::from(format!("Hello from {} #{}", self.name, delta.tick));
            self.publisher.publish(&msg)?;
        }
        let reports = self.params.report_connections.then(|| self.report());
        Ok(reports)
    }

    fn on_message(&self, msg: &StringMsg) {
        info!("Received: '{}'", msg.data);
    }

    /// Processes messages and ticks until the subscription stream ends.
    pub async fn run(mut self) -> Result<()> {
        loop {
            let event = tokio::select! {
                msg = self.subscription.next() => Event::Message(msg),
                delta = self.timer.tick() => Event::Tick(delta),
            };

            match event {
                Event::Message(Some(msg)) => self.on_message(&msg),
                Event::Message(None) => break,
                Event::Tick(delta) => match self.on_tick(&delta) {
                    Ok(_) => {}
                    Err(runtime::Error::ContextShutdown) => break,
                    Err(err) => return Err(err.into()),
                },
            }
        }

        info!(node = %self.name, "subscription closed, stopping");
        Ok(())
    }
}
