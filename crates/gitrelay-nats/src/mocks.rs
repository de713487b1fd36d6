use std::sync::{Arc, Mutex};

use bytes::Bytes;

use crate::publish::{PublishError, StreamPublisher};

/// Records every publish and can be told to fail, for driving the relay
/// pipeline without a broker.
#[derive(Clone, Debug, Default)]
pub struct MockPublisher {
    published: Arc<Mutex<Vec<(String, Bytes)>>>,
    fail_count: Arc<Mutex<u32>>,
    fail_always: Arc<Mutex<bool>>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next publish attempt, then succeed again.
    pub fn fail_next_publish(&self) {
        *self.fail_count.lock().unwrap() = 1;
    }

    /// Fail every publish attempt until further notice.
    pub fn fail_all_publishes(&self) {
        *self.fail_always.lock().unwrap() = true;
    }

    /// Every `(channel, payload)` pair published so far, in order.
    pub fn published(&self) -> Vec<(String, Bytes)> {
        self.published.lock().unwrap().clone()
    }

    pub fn published_channels(&self) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|(channel, _)| channel.clone())
            .collect()
    }
}

impl StreamPublisher for MockPublisher {
    async fn publish(&self, channel: String, payload: Bytes) -> Result<(), PublishError> {
        let fail = {
            let mut count = self.fail_count.lock().unwrap();
            if *self.fail_always.lock().unwrap() {
                true
            } else if *count > 0 {
                *count -= 1;
                true
            } else {
                false
            }
        };
        if fail {
            return Err(PublishError::Send {
                channel,
                reason: "simulated publish failure".into(),
            });
        }
        self.published.lock().unwrap().push((channel, payload));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_publishes_in_order() {
        let mock = MockPublisher::new();
        mock.publish("a".into(), Bytes::from("1")).await.unwrap();
        mock.publish("b".into(), Bytes::from("2")).await.unwrap();

        assert_eq!(mock.published_channels(), vec!["a", "b"]);
        assert_eq!(
            mock.published(),
            vec![
                ("a".to_string(), Bytes::from("1")),
                ("b".to_string(), Bytes::from("2")),
            ]
        );
    }

    #[tokio::test]
    async fn fail_next_publish_fails_once_then_succeeds() {
        let mock = MockPublisher::new();
        mock.fail_next_publish();

        assert!(mock.publish("a".into(), Bytes::new()).await.is_err());
        assert!(mock.publish("a".into(), Bytes::new()).await.is_ok());
        assert_eq!(mock.published_channels(), vec!["a"]);
    }

    #[tokio::test]
    async fn fail_all_publishes_keeps_failing() {
        let mock = MockPublisher::new();
        mock.fail_all_publishes();

        assert!(mock.publish("a".into(), Bytes::new()).await.is_err());
        assert!(mock.publish("b".into(), Bytes::new()).await.is_err());
        assert!(mock.published().is_empty());
    }
}
