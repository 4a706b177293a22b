//! 购物车状态管理模块
//!
//! 购物车内容完全由服务端拥有：每次变更用响应快照整体替换本地状态，
//! 本地从不自行增删条目。并发变更用递增序号票据串行化——
//! 每次变更领取新票据，响应返回时票据已过期则整个丢弃，
//! 保证最后发起的变更的响应决定最终状态。

use leptos::prelude::*;

use scuffers_shared::{Cart, CartItem};

use crate::api::{ApiError, ShopBackend};

#[cfg(test)]
mod tests;

/// 加载失败的兜底文案
const LOAD_ERROR: &str = "No se pudo cargar el carrito.";
/// 变更失败的兜底文案
const MUTATE_ERROR: &str = "No se pudo actualizar el carrito.";

// =========================================================
// 状态 (State)
// =========================================================

/// 「已加入购物车」弹窗的内容，取自服务端响应快照
#[derive(Debug, Clone, PartialEq)]
pub struct LastAdded {
    pub item: CartItem,
    pub total_items: u32,
    pub total_amount: f64,
}

/// 购物车状态
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartState {
    /// 最近一次服务端快照（未加载为 None）
    pub cart: Option<Cart>,
    /// 首次加载中
    pub loading: bool,
    /// 有变更在途（行内 +/- 按钮此时禁用）
    pub updating: bool,
    /// 最近一次操作的错误文案
    pub error: Option<String>,
    /// 弹窗内容
    pub last_added: Option<LastAdded>,
    /// 弹窗是否可见
    pub show_added_popup: bool,
    /// 已发出的最大变更票据
    seq_issued: u64,
}

impl CartState {
    /// 领取新的变更票据。领取即作废所有在途响应
    pub fn begin_mutation(&mut self) -> u64 {
        self.seq_issued += 1;
        self.updating = true;
        self.error = None;
        self.seq_issued
    }

    /// 票据是否仍是最新
    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.seq_issued
    }

    /// 应用服务端快照。过期票据整个丢弃，包括快照本身
    pub fn apply_snapshot(&mut self, ticket: u64, cart: Cart) {
        if !self.is_current(ticket) {
            return;
        }
        self.cart = Some(cart);
        self.updating = false;
    }

    /// 记录变更失败。同样只认最新票据
    pub fn fail_mutation(&mut self, ticket: u64, message: String) {
        if !self.is_current(ticket) {
            return;
        }
        self.error = Some(message);
        self.updating = false;
    }

    pub fn item_count(&self) -> u32 {
        self.cart.as_ref().map(Cart::item_count).unwrap_or(0)
    }

    pub fn total_amount(&self) -> f64 {
        self.cart.as_ref().map(Cart::total_amount).unwrap_or(0.0)
    }
}

/// 从服务端快照里找出刚加入的条目，组装弹窗内容
///
/// 快照里找不到该条目（后端归并或响应形态异常）时返回 None，
/// 调用方静默跳过弹窗，购物车本体不受影响。
pub fn derive_last_added(cart: &Cart, slug: &str, talle: Option<&str>) -> Option<LastAdded> {
    let item = cart.find_item(slug, talle)?;
    Some(LastAdded {
        item: item.clone(),
        total_items: cart.item_count(),
        total_amount: cart.total_amount(),
    })
}

// =========================================================
// Context
// =========================================================

/// 购物车上下文，挂在 App 根部
#[derive(Clone, Copy)]
pub struct CartContext {
    state: ReadSignal<CartState>,
    set_state: WriteSignal<CartState>,
}

impl CartContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(CartState::default());
        Self { state, set_state }
    }

    pub fn state(&self) -> ReadSignal<CartState> {
        self.state
    }

    /// Header 角标用的条目总数信号
    pub fn item_count(&self) -> Signal<u32> {
        let state = self.state;
        Signal::derive(move || state.with(CartState::item_count))
    }

    /// 全量刷新（登录后 / 进入购物车页时调用）
    pub async fn refresh<B: ShopBackend>(&self, backend: &B) {
        self.set_state.update(|s| {
            s.loading = true;
            s.error = None;
        });

        match backend.my_cart().await {
            Ok(cart) => self.set_state.update(|s| {
                s.cart = Some(cart);
                s.loading = false;
            }),
            Err(err) => {
                log_error!("[Cart] Failed to load cart: {err}");
                self.set_state.update(|s| {
                    s.error = Some(err.user_message(LOAD_ERROR));
                    s.loading = false;
                });
            }
        }
    }

    /// 加入购物车。成功后用响应快照替换状态并弹出确认弹窗
    pub async fn add<B: ShopBackend>(
        &self,
        backend: &B,
        slug: &str,
        quantity: u32,
        talle: Option<&str>,
    ) {
        let ticket = self.begin();

        match backend.cart_add(slug, quantity, talle).await {
            Ok(cart) => {
                let popup = derive_last_added(&cart, slug, talle);
                self.set_state.update(|s| {
                    s.apply_snapshot(ticket, cart);
                    if s.is_current(ticket) {
                        if let Some(added) = popup {
                            s.last_added = Some(added);
                            s.show_added_popup = true;
                        }
                    }
                });
            }
            Err(err) => self.fail(ticket, &err),
        }
    }

    /// 减少数量 / 移除条目
    pub async fn remove<B: ShopBackend>(
        &self,
        backend: &B,
        slug: &str,
        quantity: u32,
        talle: Option<&str>,
    ) {
        let ticket = self.begin();

        match backend.cart_remove(slug, quantity, talle).await {
            Ok(cart) => self.set_state.update(|s| s.apply_snapshot(ticket, cart)),
            Err(err) => self.fail(ticket, &err),
        }
    }

    /// 关闭「已加入」弹窗
    pub fn close_added_popup(&self) {
        self.set_state.update(|s| {
            s.show_added_popup = false;
        });
    }

    /// 登出时丢弃本地状态
    pub fn reset(&self) {
        self.set_state.set(CartState::default());
    }

    fn begin(&self) -> u64 {
        let mut ticket = 0;
        self.set_state.update(|s| ticket = s.begin_mutation());
        ticket
    }

    fn fail(&self, ticket: u64, err: &ApiError) {
        log_error!("[Cart] Mutation failed: {err}");
        let message = err.user_message(MUTATE_ERROR);
        self.set_state.update(|s| s.fail_mutation(ticket, message));
    }
}

impl Default for CartContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取购物车上下文
pub fn use_cart() -> CartContext {
    use_context::<CartContext>().expect("CartContext should be provided")
}
