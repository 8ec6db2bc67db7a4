use typestate::RegisterBus;

use crate::MemTest;
use crate::Mode;
use crate::Pattern;
use crate::TestConfig;

/// Configuration access granted while the core reads idle.
///
/// Obtained from [`MemTest::configure`], which checks the status register
/// once. The handle borrows the driver mutably, so nothing else touches the
/// core until it is dropped or consumed by [`IdleConfig::start`].
///
/// The check is not a lock on the hardware: a start issued by another bus
/// master after acquisition still takes the core out of idle.
pub struct IdleConfig<'a, B: RegisterBus> {
    driver: &'a mut MemTest<B>,
}

impl<'a, B: RegisterBus> IdleConfig<'a, B> {
    pub(crate) fn new(driver: &'a mut MemTest<B>) -> Self {
        Self { driver }
    }

    pub fn set_mode(&mut self, mode: Mode) -> &mut Self {
        self.driver.set_mode(mode);
        self
    }

    pub fn set_pattern(&mut self, pattern: Pattern) -> &mut Self {
        self.driver.set_pattern(pattern);
        self
    }

    pub fn set_range(&mut self, start_addr: u64, size: u64) -> &mut Self {
        self.driver.set_range(start_addr, size);
        self
    }

    pub fn apply(&mut self, config: &TestConfig) -> &mut Self {
        self.driver.apply(config);
        self
    }

    /// Starts the run, giving up configuration access.
    pub fn start(self) {
        self.driver.start();
    }
}
