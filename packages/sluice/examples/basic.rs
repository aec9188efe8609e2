// walks through the channel API: sending, receiving and closing.

use anyhow::{ensure, Result};
use std::thread;

fn main() -> Result<()> {
    // create
    let (sender, receiver) = sluice::channel::<i32>();

    // send
    sender.send(3)?;

    // receive. recv blocks while nothing is present, try_recv returns immediately.
    ensure!(receiver.recv()? == Some(3), "expected to receive 3");
    ensure!(receiver.try_recv()?.is_none(), "expected nothing else to be present");

    // producers on other threads, each with their own clone of the sender
    let producers = (0..4)
        .map(|n| {
            let sender = sender.clone();
            thread::spawn(move || {
                for i in 0..5 {
                    sender.send(n * 100 + i)?;
                }
                Ok::<_, sluice::error::SendError<i32>>(())
            })
        })
        .collect::<Vec<_>>();

    // recv keeps returning buffered messages after closing, then none
    let consumer = thread::spawn(move || -> Result<Vec<i32>> {
        let mut received = Vec::new();
        while let Some(n) = receiver.recv()? {
            received.push(n);
        }
        Ok(received)
    });

    for producer in producers {
        producer.join().map_err(|_| anyhow::anyhow!("producer panicked"))??;
    }
    sender.close()?;
    ensure!(sender.is_closed()?, "expected channel to be closed");

    let received = consumer.join().map_err(|_| anyhow::anyhow!("consumer panicked"))??;
    ensure!(received.len() == 20, "expected every message to be received");
    println!("received {} messages: {:?}", received.len(), received);
    Ok(())
}
