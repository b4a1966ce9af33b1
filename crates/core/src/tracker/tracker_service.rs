use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, warn};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use super::tracker_view::CoinsView;
use crate::coins::{
    group_by_quote_currency, live_prices, sort_by_base, CoinCatalogEntry, CoinPair, CoinStore,
    TrackedCoin,
};
use crate::constants::{COINS_PAGE_POSITION, MSG_COINS_DELETED, MSG_COIN_DELETED};
use crate::events::{EventBus, UiEvent};
use crate::holdings::{self, Holding};
use crate::market_data::PriceClient;
use crate::utils::format_utils::{change_color, format_money, format_signed_percent};

/// Transient per-screen state owned by the tracker.
struct RefreshState {
    /// Working copy of tracked coins, sorted by base symbol
    coins: Vec<TrackedCoin>,
    /// A user-initiated pull-to-refresh is in progress
    is_refreshing: bool,
    /// The first non-empty storage emission already triggered the initial
    /// price refresh
    first_load_done: bool,
    /// At least one coin is multi-selected
    any_selected: bool,
}

/// Presenter for the coin-list screen.
///
/// Tied to the screen's visible lifetime: [`on_create`](Self::on_create)
/// wires all subscriptions, [`on_destroy`](Self::on_destroy) releases them.
/// After destroy, no further view commands or state mutations are
/// observable, even if an in-flight fetch completes later.
pub struct CoinTracker {
    view: Arc<dyn CoinsView>,
    store: Arc<dyn CoinStore>,
    price_client: Arc<dyn PriceClient>,
    bus: EventBus,
    state: Mutex<RefreshState>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    alive: AtomicBool,
    /// Monotonic refresh counter; completions with a superseded number skip
    /// persistence so a slow early request cannot overwrite a newer result.
    refresh_seq: AtomicU64,
}

impl CoinTracker {
    pub fn new(
        view: Arc<dyn CoinsView>,
        store: Arc<dyn CoinStore>,
        price_client: Arc<dyn PriceClient>,
        bus: EventBus,
    ) -> Arc<Self> {
        Arc::new(Self {
            view,
            store,
            price_client,
            bus,
            state: Mutex::new(RefreshState {
                coins: Vec::new(),
                is_refreshing: false,
                first_load_done: false,
                any_selected: false,
            }),
            tasks: Mutex::new(Vec::new()),
            alive: AtomicBool::new(true),
            refresh_seq: AtomicU64::new(0),
        })
    }

    // ------------------------------------------------------------------
    // Lifecycle entry points
    // ------------------------------------------------------------------

    /// Stores the initial working set, wires all subscriptions, and issues
    /// one catalog fetch.
    pub fn on_create(self: &Arc<Self>, initial: Vec<TrackedCoin>) {
        {
            let mut state = self.lock_state();
            state.coins = initial;
            sort_by_base(&mut state.coins);
        }
        self.spawn_coin_stream();
        self.spawn_holdings_stream();
        self.spawn_bus_listener();
        self.refresh_catalog();
    }

    /// Triggers a price refresh if anything is tracked.
    pub fn on_start(self: &Arc<Self>) {
        let has_coins = !self.lock_state().coins.is_empty();
        if has_coins {
            self.update_prices();
        }
    }

    /// Leaving the screen silently discards an in-progress multi-select.
    pub fn on_stop(&self) {
        self.clear_selection();
    }

    /// Pull-to-refresh: always refreshes, with the spinner lifecycle
    /// published around the fetch.
    pub fn on_swipe_update(self: &Arc<Self>) {
        self.clear_selection();
        self.lock_state().is_refreshing = true;
        self.view.set_swipe_refresh_enabled(false);
        self.update_prices();
    }

    /// Releases every subscription and in-flight task. Guarantees no
    /// further side effects after this call returns.
    pub fn on_destroy(&self) {
        self.alive.store(false, Ordering::SeqCst);
        let handles = std::mem::take(&mut *self.lock_tasks());
        for handle in handles {
            handle.abort();
        }
    }

    /// Delegates navigation to the detail screen; no state mutation.
    pub fn on_coin_clicked(&self, coin: &TrackedCoin) {
        self.view.navigate_to_coin_detail(&coin.pair);
    }

    /// Toggles the coin's multi-select flag and opens the selection menu
    /// when the coin becomes selected.
    pub fn on_coin_long_clicked(&self, pair: &CoinPair) {
        let toggled = {
            let mut state = self.lock_state();
            let coin = match state.coins.iter_mut().find(|c| &c.pair == pair) {
                Some(coin) => coin,
                None => return,
            };
            coin.selected = !coin.selected;
            let toggled = coin.clone();
            state.any_selected = state.coins.iter().any(|c| c.selected);
            toggled
        };
        self.view.render(self.lock_state().coins.clone());
        if toggled.selected {
            self.view.show_selection_menu(&toggled);
        }
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    fn spawn_coin_stream(self: &Arc<Self>) {
        let this = Arc::clone(self);
        self.track(tokio::spawn(async move {
            let mut rx = this.store.observe_tracked_coins();
            loop {
                // Current value first, then every subsequent change
                let snapshot = rx.borrow_and_update().clone();
                this.on_coins_changed(snapshot);
                if rx.changed().await.is_err() {
                    break;
                }
            }
        }));
    }

    fn spawn_holdings_stream(self: &Arc<Self>) {
        let this = Arc::clone(self);
        self.track(tokio::spawn(async move {
            let mut rx = this.store.observe_holdings();
            loop {
                let snapshot = rx.borrow_and_update().clone();
                this.on_holdings_changed(snapshot);
                if rx.changed().await.is_err() {
                    break;
                }
            }
        }));
    }

    fn spawn_bus_listener(self: &Arc<Self>) {
        let this = Arc::clone(self);
        self.track(tokio::spawn(async move {
            let mut rx = this.bus.subscribe();
            loop {
                match rx.recv().await {
                    Ok(event) => this.on_bus_event(event),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Event bus listener lagged, skipped {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }));
    }

    /// Storage emitted a new tracked-coin collection. Empty emissions leave
    /// the working set untouched; the first non-empty one triggers the
    /// initial price refresh exactly once.
    fn on_coins_changed(self: &Arc<Self>, coins: Vec<TrackedCoin>) {
        if !self.is_alive() || coins.is_empty() {
            return;
        }
        let (snapshot, first_load) = {
            let mut state = self.lock_state();
            state.coins = coins;
            sort_by_base(&mut state.coins);
            let first_load = !state.first_load_done;
            state.first_load_done = true;
            (state.coins.clone(), first_load)
        };
        self.view.render(snapshot);
        if first_load {
            self.update_prices();
        }
    }

    fn on_holdings_changed(&self, holdings: Vec<Holding>) {
        if !self.is_alive() {
            return;
        }
        if holdings.is_empty() {
            self.view.enable_holdings_summary(false);
            return;
        }
        let prices = live_prices(&self.lock_state().coins);
        self.view.enable_holdings_summary(true);
        self.view
            .set_holdings_value(format_money(holdings::total_value(&holdings, &prices)));
        let change = holdings::total_change_percent(&holdings, &prices);
        self.view
            .set_holdings_change_percent(format_signed_percent(change), change_color(change));
    }

    fn on_bus_event(self: &Arc<Self>, event: UiEvent) {
        if !self.is_alive() {
            return;
        }
        match event {
            UiEvent::DeleteSelectedRequested => self.on_delete_requested(),
            UiEvent::PageChanged(position) if position != COINS_PAGE_POSITION => {
                self.clear_selection();
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Price refresh
    // ------------------------------------------------------------------

    /// Fetches live quotes for the whole working set, one request per
    /// distinct quote currency, then merges and persists the result.
    fn update_prices(self: &Arc<Self>) {
        let groups = group_by_quote_currency(&self.lock_state().coins);
        if groups.is_empty() {
            // Nothing tracked: no loading events, but a wedged
            // pull-to-refresh spinner still has to complete.
            self.finish_refresh_spinner();
            return;
        }
        self.bus.publish(UiEvent::CoinsLoading(true));
        let seq = self.refresh_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let this = Arc::clone(self);
        self.track(tokio::spawn(async move {
            match this.price_client.fetch_prices(&groups).await {
                Ok(fetched) if !fetched.is_empty() => {
                    if this.is_alive() && this.refresh_seq.load(Ordering::SeqCst) == seq {
                        this.apply_fetched_prices(fetched).await;
                    } else {
                        debug!("Discarding superseded price refresh result");
                    }
                }
                Ok(_) => debug!("Price refresh returned no data"),
                Err(e) => warn!("Price refresh failed: {}", e),
            }
            if !this.is_alive() {
                return;
            }
            this.bus.publish(UiEvent::CoinsLoading(false));
            this.finish_refresh_spinner();
        }));
    }

    /// Filters the response down to exactly the pairs in the working set,
    /// carries over per-coin UI state, backfills missing icons from the
    /// catalog, and persists the merged result.
    async fn apply_fetched_prices(&self, fetched: Vec<TrackedCoin>) {
        let mut merged = {
            let state = self.lock_state();
            let by_pair: HashMap<&CoinPair, &TrackedCoin> =
                fetched.iter().map(|c| (&c.pair, c)).collect();
            state
                .coins
                .iter()
                .filter_map(|current| {
                    by_pair.get(&current.pair).map(|quote| TrackedCoin {
                        pair: current.pair.clone(),
                        price: quote.price,
                        change_pct_24h: quote.change_pct_24h,
                        sort_order: current.sort_order,
                        img_url: quote.img_url.clone().or_else(|| current.img_url.clone()),
                        selected: current.selected,
                        updated_at: quote.updated_at,
                    })
                })
                .collect::<Vec<_>>()
        };
        if merged.is_empty() {
            return;
        }

        if merged.iter().any(|coin| coin.img_url.is_none()) {
            match self.store.get_catalog().await {
                Ok(catalog) => backfill_images(&mut merged, &catalog),
                Err(e) => warn!("Catalog lookup for image backfill failed: {}", e),
            }
        }

        if let Err(e) = self.store.save_tracked_coins(merged).await {
            warn!("Failed to persist refreshed prices: {}", e);
        }
    }

    /// One-shot catalog fetch at creation; keeps symbol-to-image lookups
    /// current. Failure retains whatever catalog is already stored.
    fn refresh_catalog(self: &Arc<Self>) {
        let this = Arc::clone(self);
        self.track(tokio::spawn(async move {
            match this.price_client.fetch_catalog().await {
                Ok(catalog) if !catalog.is_empty() => {
                    if !this.is_alive() {
                        return;
                    }
                    if let Err(e) = this.store.save_catalog(catalog).await {
                        warn!("Failed to persist coin catalog: {}", e);
                    }
                }
                Ok(_) => debug!("Catalog fetch returned no entries"),
                Err(e) => warn!("Catalog fetch failed: {}", e),
            }
        }));
    }

    // ------------------------------------------------------------------
    // Selection and delete
    // ------------------------------------------------------------------

    fn on_delete_requested(self: &Arc<Self>) {
        let selected: Vec<CoinPair> = {
            let state = self.lock_state();
            state
                .coins
                .iter()
                .filter(|coin| coin.selected)
                .map(|coin| coin.pair.clone())
                .collect()
        };
        if selected.is_empty() {
            return;
        }
        let message = if selected.len() > 1 {
            MSG_COINS_DELETED
        } else {
            MSG_COIN_DELETED
        };
        let this = Arc::clone(self);
        self.track(tokio::spawn(async move {
            if let Err(e) = this.store.delete_tracked_coins(&selected).await {
                warn!("Failed to delete selected coins: {}", e);
                return;
            }
            if !this.is_alive() {
                return;
            }
            let snapshot = {
                let mut state = this.lock_state();
                state.coins.retain(|coin| !selected.contains(&coin.pair));
                state.any_selected = false;
                state.coins.clone()
            };
            this.view.render(snapshot);
            this.view.show_delete_confirmation(message.to_string());
            this.bus.publish(UiEvent::TrackedListUpdated);
        }));
    }

    fn clear_selection(&self) {
        let snapshot = {
            let mut state = self.lock_state();
            if !state.any_selected {
                return;
            }
            for coin in state.coins.iter_mut() {
                coin.selected = false;
            }
            state.any_selected = false;
            state.coins.clone()
        };
        self.view.render(snapshot);
    }

    fn finish_refresh_spinner(&self) {
        let was_refreshing = std::mem::take(&mut self.lock_state().is_refreshing);
        if was_refreshing {
            self.view.hide_refresh_spinner();
            self.view.set_swipe_refresh_enabled(true);
        }
    }

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------

    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    fn track(&self, handle: JoinHandle<()>) {
        let mut tasks = self.lock_tasks();
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
    }

    fn lock_state(&self) -> MutexGuard<'_, RefreshState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_tasks(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.tasks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn backfill_images(coins: &mut [TrackedCoin], catalog: &[CoinCatalogEntry]) {
    let by_symbol: HashMap<&str, &CoinCatalogEntry> = catalog
        .iter()
        .map(|entry| (entry.symbol.as_str(), entry))
        .collect();
    for coin in coins.iter_mut().filter(|coin| coin.img_url.is_none()) {
        if let Some(entry) = by_symbol.get(coin.pair.base.as_str()) {
            coin.img_url = entry.image_url.clone();
        }
    }
}
