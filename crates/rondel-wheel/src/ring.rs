//! Fixed-capacity slot ring.
//!
//! The visible window of the wheel is a fixed number of slots spanning
//! `[-max_angle, +max_angle]`. Instead of a linked graph, the ring is an
//! arena indexed by a modular head cursor: logical position `p` lives at
//! arena index `(head + p) % capacity`, and recycling an edge slot to the
//! opposite end is one cursor step plus an in-place rewrite of that slot.
//! Arena indices double as [`SlotId`](crate::SlotId)s, so recycling never
//! disturbs render identity.

use rondel_data::DataSource;

/// Tolerance subtracted before counting whole intervals inside `max_angle`.
pub(crate) const ANGLE_EPS: f32 = 1e-4;

/// One visual slot: a value (or `None` past the domain edge) at an angle.
#[derive(Debug)]
pub struct Slot<T> {
    pub data: Option<T>,
    pub angle: f32,
}

/// The slot arena. Position 0 is the top of the window (most positive
/// angle); the last position is the bottom. The center position holds the
/// initially selected value.
pub struct Ring<T> {
    slots: Vec<Slot<T>>,
    head: usize,
}

impl<T: Clone + PartialEq> Ring<T> {
    /// Materializes the window around `source.init()`: the center slot at
    /// angle 0, then outward in `interval_angle` steps while the next step
    /// stays strictly inside `max_angle`. Slots past the domain edge get
    /// `None`.
    pub fn build(source: &dyn DataSource<T>, interval_angle: f32, max_angle: f32) -> Self {
        let side = side_count(interval_angle, max_angle);
        let capacity = side * 2 + 1;
        let mut slots: Vec<Slot<T>> = Vec::with_capacity(capacity);

        // Top half: walk the prev chain outward from the init value.
        let mut above: Vec<Slot<T>> = Vec::with_capacity(side);
        let mut frontier = source.init();
        for step in 1..=side {
            frontier = source.prev(&frontier);
            above.push(Slot {
                data: frontier.clone(),
                angle: step as f32 * interval_angle,
            });
        }
        slots.extend(above.into_iter().rev());

        slots.push(Slot {
            data: source.init(),
            angle: 0.0,
        });

        let mut frontier = source.init();
        for step in 1..=side {
            frontier = source.next(&frontier);
            slots.push(Slot {
                data: frontier.clone(),
                angle: -(step as f32) * interval_angle,
            });
        }

        Self { slots, head: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots on either side of the center.
    pub fn side_count(&self) -> usize {
        (self.slots.len() - 1) / 2
    }

    /// Arena index of the center position.
    pub fn center(&self) -> usize {
        self.arena_index(self.side_count())
    }

    pub fn arena_index(&self, position: usize) -> usize {
        (self.head + position) % self.slots.len()
    }

    /// Window position of an arena index (0 = top).
    pub fn position_of(&self, arena: usize) -> usize {
        (arena + self.slots.len() - self.head) % self.slots.len()
    }

    pub fn slot(&self, arena: usize) -> &Slot<T> {
        &self.slots[arena]
    }

    pub fn slot_mut(&mut self, arena: usize) -> &mut Slot<T> {
        &mut self.slots[arena]
    }

    pub fn first(&self) -> &Slot<T> {
        &self.slots[self.head]
    }

    pub fn last(&self) -> &Slot<T> {
        &self.slots[self.arena_index(self.slots.len() - 1)]
    }

    /// Arena index of the slot one position above (`-1`) or below (`+1`).
    /// Wraps across the arena; the caller keeps itself inside the window.
    pub fn neighbor(&self, arena: usize, offset: i32) -> usize {
        let len = self.slots.len() as i32;
        ((arena as i32 + offset).rem_euclid(len)) as usize
    }

    /// Subtracts `delta` degrees from every slot angle.
    pub fn rotate(&mut self, delta: f32) {
        for slot in &mut self.slots {
            slot.angle -= delta;
        }
    }

    /// Moves the top slot to the bottom with `data`, placing it one recycle
    /// span below its old position (one interval below the old bottom slot).
    pub fn recycle_first_to_last(&mut self, span: f32, data: Option<T>) {
        let old_head = self.head;
        self.head = (self.head + 1) % self.slots.len();
        let new_first_angle = self.slots[self.head].angle;
        let slot = &mut self.slots[old_head];
        slot.angle = new_first_angle - span;
        slot.data = data;
    }

    /// Moves the bottom slot to the top with `data`, symmetric to
    /// [`recycle_first_to_last`](Self::recycle_first_to_last).
    pub fn recycle_last_to_first(&mut self, span: f32, data: Option<T>) {
        let old_last = self.arena_index(self.slots.len() - 1);
        let new_last_angle = self.slots[self.arena_index(self.slots.len() - 2)].angle;
        self.head = (self.head + self.slots.len() - 1) % self.slots.len();
        let slot = &mut self.slots[old_last];
        slot.angle = new_last_angle + span;
        slot.data = data;
    }

    /// Arena-indexed iteration (render order is irrelevant to the sink).
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Slot<T>)> {
        self.slots.iter().enumerate()
    }

    /// Slots in window order, top to bottom.
    pub fn positions(&self) -> impl Iterator<Item = &Slot<T>> {
        (0..self.slots.len()).map(|p| &self.slots[self.arena_index(p)])
    }
}

/// Whole intervals fitting strictly inside `max_angle` on one side.
pub(crate) fn side_count(interval_angle: f32, max_angle: f32) -> usize {
    ((max_angle - ANGLE_EPS) / interval_angle).floor() as usize
}
