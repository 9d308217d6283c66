//! Bounded result channel between pool workers and the pool.

use tokio::sync::mpsc;

use crate::config::PipelineConfig;

/// Create a bounded channel pair with the configured buffer size.
///
/// Workers run on blocking threads and use `blocking_send`; when the buffer
/// is full they wait until the pool has drained it.
pub fn bounded_channel<T>(config: &PipelineConfig) -> (mpsc::Sender<T>, mpsc::Receiver<T>) {
    mpsc::channel(config.buffer_size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bounded_channel() {
        let config = PipelineConfig { buffer_size: 10 };

        let (tx, mut rx) = bounded_channel::<i32>(&config);

        tx.send(42).await.unwrap();
        let received = rx.recv().await;

        assert_eq!(received, Some(42));
    }

    #[tokio::test]
    async fn test_blocking_sender_feeds_async_receiver() {
        let config = PipelineConfig { buffer_size: 1 };
        let (tx, mut rx) = bounded_channel::<usize>(&config);

        let producer = tokio::task::spawn_blocking(move || {
            for i in 0..5 {
                tx.blocking_send(i).unwrap();
            }
        });

        let mut received = Vec::new();
        while let Some(i) = rx.recv().await {
            received.push(i);
        }
        producer.await.unwrap();

        assert_eq!(received, vec![0, 1, 2, 3, 4]);
    }
}
