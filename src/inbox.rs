// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The handoff point between the network and the game loop. A reader thread
//! pushes raw lines as they arrive and the game loop drains them once per frame;
//! the board itself is only ever touched by the draining thread.
use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread::{Builder, JoinHandle};

use parking_lot::Mutex;

/// A bounded queue of undecoded server lines.
pub struct Inbox {
    queue: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl Inbox {
    pub fn new(capacity: usize) -> Inbox {
        Inbox {
            queue: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Enqueues a line. If the inbox is already full the line is dropped and
    /// false is returned.
    pub fn push(&self, line: String) -> bool {
        let mut queue = self.queue.lock();
        if queue.len() >= self.capacity {
            warn!("inbox full ({} messages), dropping `{}`", self.capacity, line);
            return false;
        }

        queue.push_back(line);
        true
    }

    /// Takes every queued line, oldest first.
    pub fn drain(&self) -> Vec<String> {
        let mut queue = self.queue.lock();
        queue.drain(..).collect()
    }
}

/// Spawns a thread that reads lines from `reader` into the inbox until the
/// stream ends. Blank lines are skipped.
pub fn spawn_reader<R>(reader: R, inbox: Arc<Inbox>) -> io::Result<JoinHandle<io::Result<()>>>
where
    R: BufRead + Send + 'static,
{
    Builder::new()
        .name("inbox-reader".to_string())
        .spawn(move || {
            info!("inbox reader starting");
            for line in reader.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }

                debug!("received: {}", line);
                inbox.push(line);
            }

            info!("inbox reader reached end of stream");
            Ok(())
        })
}
