use std::rc::Rc;

use shared::{AvailabilityStore, BlockedDates};
use yew::prelude::*;

/// Latest blocked set from `store`; the component re-renders on every publish
#[hook]
pub fn use_blocked_dates(store: &AvailabilityStore) -> Rc<BlockedDates> {
    let blocked = {
        let store = store.clone();
        use_state_eq(move || store.current())
    };

    {
        let blocked = blocked.clone();
        use_effect_with(store.clone(), move |store| {
            // Anything published between the first render and now
            blocked.set(store.current());

            let id = {
                let blocked = blocked.clone();
                store.subscribe(move |next| blocked.set(Rc::clone(next)))
            };
            let store = store.clone();
            move || store.unsubscribe(id)
        });
    }

    (*blocked).clone()
}
