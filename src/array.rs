use std::cmp::Ordering;
use std::mem::MaybeUninit;

/// Hook executed when a slot's element is discarded, meant to release
/// resources referenced by that element. Receives the slot index and a raw
/// pointer to the slot, which on final teardown may point at vacated,
/// zero-filled memory.
pub type EvictFn<T> = Box<dyn FnMut(usize, *mut T)>;

/// Contiguous array of `T` with a hard capacity ceiling fixed at construction.
///
/// Storage never moves and never grows. The live elements occupy indices
/// `[0, len)`; everything past that is vacated memory the implementation
/// keeps zero-filled, but "zeroed" is not a promise to callers, only "not
/// live".
///
/// # Index rule
///
/// Every indexed operation accepts `index <= len`, not `index < len`. The
/// one-past-the-end slot is addressable on purpose: `set` can write it
/// without bumping `len`, and `remove(len)` is a defined (if odd) truncation.
/// Anything above `len` is rejected with a `warn!` diagnostic and the
/// operation's fallback applies.
///
/// # Cleanup
///
/// The array never runs `T`'s `Drop`. If elements hold resources, install an
/// eviction hook with [`FixedArray::evict_with`]; it fires on ordered removal
/// and, when the array itself is dropped, once for every slot in
/// `[0, capacity)` regardless of `len`. Plain overwrites (`set`, a saturated
/// `append`, the swap in `remove_lazy`) discard the previous bytes silently.
pub struct FixedArray<T> where T: Sized {
    slots: Box<[MaybeUninit<T>]>,
    len: usize,
    capacity: usize,
    on_evict: Option<EvictFn<T>>,
}

impl<T> FixedArray<T> where T: Sized {
    /// Creates an empty array that can hold up to `capacity` elements.
    ///
    /// Allocates `capacity + 1` zero-filled slots; the extra slot backs the
    /// one-past-the-end writes described in the index rule.
    pub fn with_capacity(capacity: usize) -> FixedArray<T> {
        let slots = (0..capacity + 1)
            .map(|_| MaybeUninit::zeroed())
            .collect::<Vec<_>>()
            .into_boxed_slice();
        FixedArray {
            slots,
            len: 0,
            capacity,
            on_evict: None,
        }
    }

    /// Installs the eviction hook.
    pub fn evict_with(mut self, fun: impl FnMut(usize, *mut T) + 'static) -> FixedArray<T> {
        self.on_evict = Some(Box::new(fun));
        self
    }

    /// Binds an already-prepared slot buffer without copying.
    ///
    /// The buffer must hold one slot more than the intended capacity
    /// (capacity is `slots.len() - 1`), and `len` is trusted as-is.
    ///
    /// # Safety
    ///
    /// The first `len` slots must contain initialized `T` values, and `len`
    /// must not exceed the capacity.
    pub unsafe fn from_raw_parts(
        slots: Box<[MaybeUninit<T>]>,
        len: usize,
        on_evict: Option<EvictFn<T>>,
    ) -> FixedArray<T> {
        let capacity = slots.len().saturating_sub(1);
        FixedArray {
            slots,
            len,
            capacity,
            on_evict,
        }
    }

    /// Number of live elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Maximum number of live elements, fixed at construction.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    fn base(&self) -> *const T {
        self.slots.as_ptr() as *const T
    }

    #[inline(always)]
    fn base_mut(&mut self) -> *mut T {
        self.slots.as_mut_ptr() as *mut T
    }

    /// Returns true if the index is valid (`index <= len`). If it is not,
    /// emits a diagnostic and returns false.
    fn check_index(&self, i: usize) -> bool {
        if i > self.len {
            warn!("invalid index {} (len {})", i, self.len);
            false
        } else {
            true
        }
    }

    /// Appends `item` by moving it into the slot at `len` and returns the
    /// index it was written to.
    ///
    /// At full capacity the append saturates: the write still happens, into
    /// the one-past-the-end slot, but `len` stays put and the returned index
    /// aliases the last live element. On a zero-capacity array the returned
    /// index wraps to `usize::MAX`.
    pub fn append(&mut self, item: T) -> usize {
        // the check can't fail for i == len; kept so the diagnostic path
        // stays uniform across operations
        self.check_index(self.len);
        unsafe { std::ptr::write(self.base_mut().add(self.len), item) };
        if self.len < self.capacity {
            self.len += 1;
        }
        self.len.wrapping_sub(1)
    }

    /// Appends the boxed value and releases the transient allocation.
    pub fn append_boxed(&mut self, item: Box<T>) -> usize {
        self.append(*item)
    }

    /// Removes the element at `i`, preserving the order of everything after
    /// it. Runs the eviction hook on the slot first, then closes the gap by
    /// shifting the tail (including the freshly zeroed one-past-the-end
    /// slot) left by one.
    ///
    /// Returns false without mutating anything when `i` fails the index rule
    /// or the array is empty.
    pub fn remove(&mut self, i: usize) -> bool {
        if !self.check_index(i) {
            return false;
        }
        if self.len == 0 {
            warn!("remove at {} on empty array", i);
            return false;
        }
        if self.on_evict.is_some() {
            let item = unsafe { self.base_mut().add(i) };
            if let Some(fun) = self.on_evict.as_mut() {
                fun(i, item);
            }
        }
        // slots to shift, counting the zeroed slot at the old len
        let tail = self.len - i;
        unsafe {
            let base = self.base_mut();
            std::ptr::write_bytes(base.add(self.len), 0, 1);
            self.len -= 1;
            std::ptr::copy(base.add(i + 1) as *const T, base.add(i), tail);
        }
        true
    }

    /// O(1) removal that copies the last live element over slot `i`,
    /// breaking element order. Does not run the eviction hook.
    ///
    /// Returns false when `i` fails the index rule or the array is empty.
    pub fn remove_lazy(&mut self, i: usize) -> bool {
        if !self.check_index(i) {
            return false;
        }
        if self.len == 0 {
            warn!("remove_lazy at {} on empty array", i);
            return false;
        }
        self.len -= 1;
        unsafe {
            let base = self.base_mut();
            std::ptr::copy(base.add(self.len) as *const T, base.add(i), 1);
        }
        true
    }

    /// Writes `item` into slot `i`, or appends it when `i > len`.
    ///
    /// `i == len` is allowed and writes the one-past-the-end slot without
    /// changing `len`. The previous slot contents are discarded without
    /// dropping and without the eviction hook; pair with `remove` when the
    /// old element holds resources.
    pub fn set(&mut self, item: T, i: usize) {
        if i > self.len {
            self.append(item);
        } else {
            unsafe { std::ptr::write(self.base_mut().add(i), item) };
        }
    }

    /// `set` for a boxed value, releasing the transient allocation.
    pub fn set_boxed(&mut self, item: Box<T>, i: usize) {
        self.set(*item, i);
    }

    /// Returns a reference to slot `i`, or `None` when `i` fails the index
    /// rule. `i == len` refers to vacated memory; only meaningful for
    /// element types that tolerate zeroed bytes.
    pub fn get(&self, i: usize) -> Option<&T> {
        if !self.check_index(i) {
            return None;
        }
        Some(unsafe { &*self.base().add(i) })
    }

    /// Mutable companion of `get`.
    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        if !self.check_index(i) {
            return None;
        }
        Some(unsafe { &mut *self.base_mut().add(i) })
    }

    /// Zero-fills the whole backing buffer and resets `len` to 0. The
    /// eviction hook is not consulted.
    pub fn clear(&mut self) {
        trace!("clear {} slots", self.slots.len());
        unsafe { std::ptr::write_bytes(self.slots.as_mut_ptr(), 0, self.slots.len()) };
        self.len = 0;
    }

    /// Runs `fun(index, element)` for every live element in ascending index
    /// order. The element may be mutated in place.
    pub fn for_each(&mut self, mut fun: impl FnMut(usize, &mut T)) {
        for i in 0..self.len {
            let item = unsafe { &mut *self.base_mut().add(i) };
            fun(i, item);
        }
    }

    /// The live elements as a slice.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.base(), self.len) }
    }

    /// The live elements as a mutable slice.
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.base_mut(), self.len) }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Unstable in-place sort of the live elements by a three-way comparator.
    pub fn sort(&mut self, mut cmp: impl FnMut(&T, &T) -> Ordering) {
        self.as_mut_slice().sort_unstable_by(|a, b| cmp(a, b));
    }

    /// Binary search over the live elements, which must already be sorted
    /// consistently with `cmp(element, key)`. Returns any matching element.
    pub fn binary_search(&self, key: &T, mut cmp: impl FnMut(&T, &T) -> Ordering) -> Option<&T> {
        match self.as_slice().binary_search_by(|probe| cmp(probe, key)) {
            Ok(i) => Some(&self.as_slice()[i]),
            Err(_) => None,
        }
    }
}

impl<T> Drop for FixedArray<T> where T: Sized {
    fn drop(&mut self) {
        trace!("drop array, capacity {}", self.capacity);
        let base = self.slots.as_mut_ptr() as *mut T;
        if let Some(fun) = self.on_evict.as_mut() {
            // over capacity, not len: the hook also sees vacated slots
            for i in 0..self.capacity {
                fun(i, unsafe { base.add(i) });
            }
        }
    }
}

impl<T> std::fmt::Debug for FixedArray<T> where T: std::fmt::Debug, T: Sized {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for i in self.iter() {
            list.entry(i);
        }
        list.finish()
    }
}
