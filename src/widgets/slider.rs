//! Testimonial slider
//!
//! Wrap-around navigation with dots and a repeating auto-advance timer that
//! pauses while the pointer is over the slider.

use serde::Serialize;
use std::time::Duration;

use super::error::{WidgetError, WidgetResult};
use crate::events::{Component, Effect, Region, TimerId, Topic, UiEvent};

/// Default auto-advance interval
pub const DEFAULT_SLIDER_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliderView {
    pub current: usize,
    /// CSS transform for the slide track
    pub transform: String,
    /// One flag per dot; exactly one is set
    pub dots: Vec<bool>,
    pub paused: bool,
}

#[derive(Debug, Clone)]
pub struct Slider {
    count: usize,
    current: usize,
    interval: Duration,
    paused: bool,
}

impl Slider {
    pub fn new(count: usize, interval: Duration) -> WidgetResult<Self> {
        if count == 0 {
            return Err(WidgetError::EmptySlider);
        }
        Ok(Self {
            count,
            current: 0,
            interval,
            paused: false,
        })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.count;
    }

    pub fn prev(&mut self) {
        self.current = (self.current + self.count - 1) % self.count;
    }

    pub fn go_to(&mut self, index: usize) -> WidgetResult<()> {
        if index >= self.count {
            return Err(WidgetError::SlideOutOfRange {
                index,
                count: self.count,
            });
        }
        self.current = index;
        Ok(())
    }

    pub fn view(&self) -> SliderView {
        SliderView {
            current: self.current,
            transform: format!("translateX(-{}%)", self.current * 100),
            dots: (0..self.count).map(|i| i == self.current).collect(),
            paused: self.paused,
        }
    }

    fn arm(&self) -> Effect {
        Effect::Schedule {
            timer: TimerId::SliderAdvance,
            after: self.interval,
            repeat: true,
        }
    }
}

impl Component for Slider {
    fn name(&self) -> &'static str {
        "slider"
    }

    fn topics(&self) -> &'static [Topic] {
        &[Topic::Slider, Topic::Pointer, Topic::Timer]
    }

    fn on_mount(&mut self) -> Vec<Effect> {
        vec![self.arm()]
    }

    fn handle(&mut self, event: &UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::SliderNext => self.next(),
            UiEvent::SliderPrev => self.prev(),
            UiEvent::SliderDotClicked { index } => {
                if let Err(e) = self.go_to(*index) {
                    tracing::warn!(error = %e, "Slider dot ignored");
                }
            }
            UiEvent::TimerFired {
                timer: TimerId::SliderAdvance,
            } => self.next(),
            UiEvent::PointerEntered {
                region: Region::Slider,
            } => {
                self.paused = true;
                return vec![Effect::Cancel(TimerId::SliderAdvance)];
            }
            UiEvent::PointerLeft {
                region: Region::Slider,
            } => {
                self.paused = false;
                return vec![self.arm()];
            }
            _ => {}
        }
        Vec::new()
    }
}
