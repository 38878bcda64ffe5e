//! Button callback device
//!
//! Each physical button can carry exactly one click callback at a time.
//! Higher layers decide which callback that is; the device only stores
//! and hands it back when the button is clicked.

/// Number of physical buttons on the board
pub const BUTTON_COUNT: usize = 4;

/// Physical buttons, identified by ordinal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Button {
    /// Button 1 (ordinal 0)
    One = 0,
    /// Button 2 (ordinal 1)
    Two = 1,
    /// Button 3 (ordinal 2)
    Three = 2,
    /// Button 4 (ordinal 3)
    Four = 3,
}

impl Button {
    /// All buttons in ordinal order
    pub const ALL: [Button; BUTTON_COUNT] = [Button::One, Button::Two, Button::Three, Button::Four];

    /// Ordinal of this button (0-based)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Board label of this button (1-based)
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Look up a button by ordinal
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Errors from binding or unbinding a callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BindError {
    /// Button ordinal does not exist on this device
    InvalidButton,
    /// Device cannot accept the change right now
    Busy,
    /// No callback was bound to the button
    NotRegistered,
}

/// Device that owns one click callback per button
///
/// `C` is the callback type. The device never calls it; whoever receives
/// the click event asks [`ClickDevice::bound`] for the callback and runs it
/// in its own context.
pub trait ClickDevice<C> {
    /// Number of buttons the device exposes
    fn button_count(&self) -> usize;

    /// Bind `callback` to a button, replacing whatever was bound
    fn register_callback(&mut self, index: usize, callback: C) -> Result<(), BindError>;

    /// Remove the callback bound to a button
    ///
    /// Returns [`BindError::NotRegistered`] if nothing was bound.
    fn unregister_callback(&mut self, index: usize) -> Result<(), BindError>;

    /// Callback currently bound to a button
    fn bound(&self, index: usize) -> Option<&C>;
}

/// In-memory click device with `N` callback slots
#[derive(Debug)]
pub struct CallbackSlots<C, const N: usize> {
    slots: [Option<C>; N],
}

impl<C, const N: usize> Default for CallbackSlots<C, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, const N: usize> CallbackSlots<C, N> {
    /// Create a device with every slot empty
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
        }
    }

    /// Number of buttons that currently have a callback bound
    pub fn bound_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

impl<C, const N: usize> ClickDevice<C> for CallbackSlots<C, N> {
    fn button_count(&self) -> usize {
        N
    }

    fn register_callback(&mut self, index: usize, callback: C) -> Result<(), BindError> {
        let slot = self.slots.get_mut(index).ok_or(BindError::InvalidButton)?;
        *slot = Some(callback);
        Ok(())
    }

    fn unregister_callback(&mut self, index: usize) -> Result<(), BindError> {
        let slot = self.slots.get_mut(index).ok_or(BindError::InvalidButton)?;
        slot.take().map(|_| ()).ok_or(BindError::NotRegistered)
    }

    fn bound(&self, index: usize) -> Option<&C> {
        self.slots.get(index).and_then(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_ordinals() {
        for (i, button) in Button::ALL.iter().enumerate() {
            assert_eq!(button.index(), i);
            assert_eq!(Button::from_index(i), Some(*button));
        }
        assert_eq!(Button::Four.number(), 4);
        assert_eq!(Button::from_index(BUTTON_COUNT), None);
    }

    #[test]
    fn test_register_replaces_previous() {
        let mut slots: CallbackSlots<u32, BUTTON_COUNT> = CallbackSlots::new();
        slots.register_callback(1, 10).unwrap();
        slots.register_callback(1, 20).unwrap();
        assert_eq!(slots.bound(1), Some(&20));
        assert_eq!(slots.bound_count(), 1);
    }

    #[test]
    fn test_unregister_empty_slot() {
        let mut slots: CallbackSlots<u32, BUTTON_COUNT> = CallbackSlots::new();
        assert_eq!(slots.unregister_callback(0), Err(BindError::NotRegistered));

        slots.register_callback(0, 1).unwrap();
        assert_eq!(slots.unregister_callback(0), Ok(()));
        assert_eq!(slots.bound(0), None);
    }

    #[test]
    fn test_out_of_range() {
        let mut slots: CallbackSlots<u32, 2> = CallbackSlots::new();
        assert_eq!(slots.register_callback(2, 1), Err(BindError::InvalidButton));
        assert_eq!(slots.unregister_callback(7), Err(BindError::InvalidButton));
        assert_eq!(slots.bound(2), None);
    }
}
