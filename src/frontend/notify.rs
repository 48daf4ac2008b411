//! Notification client: a STOMP subscription over a raw WebSocket to
//! the per-user queue. Every message body is forwarded verbatim to the
//! caller; reconnects use a fixed delay. No ordering, dedup, or ack
//! protocol beyond what the transport gives us.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use crate::stomp::{self, Frame};

const RECONNECT_DELAY_MS: u32 = 5_000;
const SUBSCRIPTION_ID: &str = "sub-0";

pub struct NotificationClient {
    inner: Rc<Inner>,
}

struct Inner {
    username: String,
    on_message: Box<dyn Fn(String)>,
    socket: RefCell<Option<WebSocket>>,
    open_cb: RefCell<Option<Closure<dyn FnMut()>>>,
    message_cb: RefCell<Option<Closure<dyn FnMut(MessageEvent)>>>,
    close_cb: RefCell<Option<Closure<dyn FnMut(CloseEvent)>>>,
    shutdown: Cell<bool>,
}

/// `ws(s)://<host>/ws`, matching the page origin.
fn socket_url() -> Option<String> {
    let location = web_sys::window()?.location();
    let protocol = location.protocol().ok()?;
    let host = location.host().ok()?;
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    Some(format!("{scheme}://{host}/ws"))
}

impl NotificationClient {
    /// Opens the channel for `username` and keeps it open until
    /// [`NotificationClient::close`].
    pub fn connect(username: &str, on_message: impl Fn(String) + 'static) -> Self {
        let inner = Rc::new(Inner {
            username: username.to_string(),
            on_message: Box::new(on_message),
            socket: RefCell::new(None),
            open_cb: RefCell::new(None),
            message_cb: RefCell::new(None),
            close_cb: RefCell::new(None),
            shutdown: Cell::new(false),
        });
        open_socket(Rc::clone(&inner));
        Self { inner }
    }

    /// Tears the connection down; no reconnect fires afterwards.
    pub fn close(&self) {
        self.inner.shutdown.set(true);
        if let Some(socket) = self.inner.socket.borrow_mut().take() {
            socket.set_onopen(None);
            socket.set_onmessage(None);
            socket.set_onclose(None);
            let _ = socket.close();
        }
        // drop the handlers so the Rc cycle through the closures breaks
        self.inner.open_cb.borrow_mut().take();
        self.inner.message_cb.borrow_mut().take();
        self.inner.close_cb.borrow_mut().take();
    }
}

fn open_socket(inner: Rc<Inner>) {
    let Some(url) = socket_url() else {
        return;
    };
    let socket = match WebSocket::new(&url) {
        Ok(socket) => socket,
        Err(_) => {
            log::warn!("notification socket could not be created");
            schedule_reconnect(inner);
            return;
        }
    };

    let on_open = {
        let socket = socket.clone();
        Closure::<dyn FnMut()>::new(move || {
            let _ = socket.send_with_str(&stomp::connect_frame().encode());
        })
    };
    socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));

    let on_message = {
        let socket = socket.clone();
        let inner = Rc::clone(&inner);
        Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
            let Some(text) = event.data().as_string() else {
                return;
            };
            let Some(frame) = Frame::parse(&text) else {
                return;
            };
            match frame.command.as_str() {
                "CONNECTED" => {
                    let destination = stomp::notification_destination(&inner.username);
                    let subscribe = stomp::subscribe_frame(SUBSCRIPTION_ID, &destination);
                    let _ = socket.send_with_str(&subscribe.encode());
                }
                "MESSAGE" => (inner.on_message)(frame.body.clone()),
                "ERROR" => {
                    log::warn!(
                        "notification channel error: {}",
                        frame.header_value("message").unwrap_or("unknown")
                    );
                }
                _ => {}
            }
        })
    };
    socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

    let on_close = {
        let inner = Rc::clone(&inner);
        Closure::<dyn FnMut(CloseEvent)>::new(move |_event: CloseEvent| {
            if !inner.shutdown.get() {
                schedule_reconnect(Rc::clone(&inner));
            }
        })
    };
    socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

    inner.open_cb.borrow_mut().replace(on_open);
    inner.message_cb.borrow_mut().replace(on_message);
    inner.close_cb.borrow_mut().replace(on_close);
    inner.socket.borrow_mut().replace(socket);
}

fn schedule_reconnect(inner: Rc<Inner>) {
    spawn_local(async move {
        TimeoutFuture::new(RECONNECT_DELAY_MS).await;
        if !inner.shutdown.get() {
            open_socket(inner);
        }
    });
}
