//! Visibility trigger — one-shot "reveal when scrolled into view".
//!
//! A region starts hidden. The first intersection report at or above the
//! threshold reveals it and ends the observation; nothing after that can hide
//! it again. The browser runs the IntersectionObserver and reports each first
//! hit to the server, which keeps one trigger per section per visitor so a
//! revealed section stays revealed across reloads.

use std::collections::{HashMap, HashSet};

use tokio::sync::Mutex;
use tracing::debug;

/// Fraction of a section that must be on screen before it is revealed.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// A callback that runs at most once and unsubscribes itself when it does.
pub struct OnceListener<T> {
    callback: Option<Box<dyn FnOnce(T) + Send>>,
}

impl<T> OnceListener<T> {
    pub fn new(callback: impl FnOnce(T) + Send + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// A listener that is already torn down.
    pub fn inert() -> Self {
        Self { callback: None }
    }

    pub fn is_active(&self) -> bool {
        self.callback.is_some()
    }

    /// Invokes the callback if it is still subscribed. Returns whether it ran.
    pub fn notify(&mut self, value: T) -> bool {
        match self.callback.take() {
            Some(callback) => {
                callback(value);
                true
            }
            None => false,
        }
    }
}

impl<T> Default for OnceListener<T> {
    fn default() -> Self {
        Self::inert()
    }
}

impl<T> std::fmt::Debug for OnceListener<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnceListener")
            .field("active", &self.is_active())
            .finish()
    }
}

/// One report from the viewport about a region.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry<R> {
    pub target: R,
    pub intersection_ratio: f64,
    pub is_intersecting: bool,
}

impl<R> IntersectionEntry<R> {
    fn meets(&self, threshold: f64) -> bool {
        self.is_intersecting && self.intersection_ratio >= threshold
    }
}

/// Reveal-once state for a single region. `R` identifies the region; a new
/// identity means the region was re-mounted.
#[derive(Debug)]
pub struct VisibilityTrigger<R> {
    threshold: f64,
    observed: Option<R>,
    visible: bool,
    on_reveal: OnceListener<R>,
}

impl<R: PartialEq + Clone> VisibilityTrigger<R> {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            observed: None,
            visible: false,
            on_reveal: OnceListener::inert(),
        }
    }

    /// Registers the callback fired when the region is revealed.
    pub fn on_reveal(mut self, callback: impl FnOnce(R) + Send + 'static) -> Self {
        self.on_reveal = OnceListener::new(callback);
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Starts observing `region`, discarding any previous observation.
    /// Once revealed there is nothing left to observe, so this is a no-op.
    pub fn attach(&mut self, region: R) {
        if self.visible {
            return;
        }
        self.observed = Some(region);
    }

    /// Feeds one viewport report. Returns true only on the hidden → visible
    /// transition. Reports for regions no longer observed are ignored.
    pub fn observe(&mut self, entry: &IntersectionEntry<R>) -> bool {
        let Some(region) = self.observed.as_ref() else {
            return false;
        };
        if *region != entry.target || !entry.meets(self.threshold) {
            return false;
        }

        self.visible = true;
        self.observed = None;
        self.on_reveal.notify(entry.target.clone());
        true
    }
}

impl<R: PartialEq + Clone> Default for VisibilityTrigger<R> {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

/// One visitor's triggers, keyed by section id.
#[derive(Debug, Default)]
pub struct RevealBoard {
    triggers: Mutex<HashMap<String, VisibilityTrigger<String>>>,
}

impl RevealBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one browser report, starting the section's observation on first
    /// sight. Returns true if this report revealed the section.
    pub async fn report(&self, entry: IntersectionEntry<String>) -> bool {
        let mut triggers = self.triggers.lock().await;
        let trigger = triggers.entry(entry.target.clone()).or_insert_with(|| {
            let mut trigger = VisibilityTrigger::default()
                .on_reveal(|section: String| debug!("Section '{section}' revealed"));
            trigger.attach(entry.target.clone());
            trigger
        });
        trigger.observe(&entry)
    }

    /// Sections already revealed; they render without the reveal animation.
    pub async fn revealed(&self) -> HashSet<String> {
        self.triggers
            .lock()
            .await
            .iter()
            .filter(|(_, trigger)| trigger.is_visible())
            .map(|(section, _)| section.clone())
            .collect()
    }
}
