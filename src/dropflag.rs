//! This module is for testing only

use std::rc::Rc;
use std::cell::RefCell;

pub type DropFlag<T> = Rc<RefCell<T>>;

/// Element that records whether `Drop` ran for it. The array must never
/// trigger it; element cleanup goes through the eviction hook instead.
pub struct DropProbe {
    pub dropflag: DropFlag<bool>,
}

impl Drop for DropProbe {
    fn drop(&mut self) {
        *self.dropflag.borrow_mut() = true;
    }
}

#[test]
fn dropflag() {
    let flag = DropFlag::new(RefCell::new(false));
    let probe = DropProbe { dropflag: flag.clone() };
    assert_eq!(false, *flag.borrow());
    std::mem::drop(probe);
    assert_eq!(true, *flag.borrow());
}
