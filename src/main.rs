//! 程序入口：初始化日志、加载 Slint UI，并绑定计算器VM

use std::{cell::RefCell, rc::Rc, time::Duration};

use anyhow::Context;
use slint::ComponentHandle;
use tracing_subscriber::fmt::SubscriberBuilder;

slint::include_modules!();

use simple_calc::utils::clipboard::copy_to_clipboard;
use simple_calc::vm::bridge::*;
use simple_calc::{
    action_for_key, Action, CalcError, Calculator, DisplayLines, Operation, Outcome, Settings,
};

/// VM桥接器：管理UI与计算器状态机的交互
struct ViewModelBridge {
    calculator: Rc<RefCell<Calculator>>,
    settings: Rc<Settings>,
}

impl ViewModelBridge {
    /// 创建新的VM桥接器并绑定所有回调
    fn new(app_window: &AppWindow, settings: Settings) -> Self {
        let bridge = Self {
            calculator: Rc::new(RefCell::new(Calculator::new())),
            settings: Rc::new(settings),
        };

        bridge.setup_callbacks(app_window);
        bridge
    }

    /// 设置所有UI回调函数
    fn setup_callbacks(&self, app_window: &AppWindow) {
        // === 数字按键回调 ===
        {
            let calculator = self.calculator.clone();
            let settings = self.settings.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_digit_pressed(move |digit| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    if let Some(token) = digit.chars().next() {
                        Self::dispatch(&app_window, &calculator, &settings, Action::Digit(token));
                    }
                }
            });
        }

        // === 运算符按键回调 ===
        {
            let calculator = self.calculator.clone();
            let settings = self.settings.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_operator_pressed(move |symbol| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    match Operation::from_symbol(symbol.as_str()) {
                        Some(op) => {
                            Self::dispatch(&app_window, &calculator, &settings, Action::Operator(op))
                        }
                        None => tracing::warn!("未知运算符: {}", symbol),
                    }
                }
            });
        }

        // === 等号按键回调 ===
        {
            let calculator = self.calculator.clone();
            let settings = self.settings.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_equals_pressed(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::dispatch(&app_window, &calculator, &settings, Action::Calculate);
                }
            });
        }

        // === 清空按键回调 ===
        {
            let calculator = self.calculator.clone();
            let settings = self.settings.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_clear_pressed(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::dispatch(&app_window, &calculator, &settings, Action::Clear);
                }
            });
        }

        // === 删除按键回调 ===
        {
            let calculator = self.calculator.clone();
            let settings = self.settings.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_delete_pressed(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::dispatch(&app_window, &calculator, &settings, Action::Delete);
                }
            });
        }

        // === 百分比按键回调 ===
        {
            let calculator = self.calculator.clone();
            let settings = self.settings.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_percent_pressed(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::dispatch(&app_window, &calculator, &settings, Action::Percent);
                }
            });
        }

        // === 复制按钮回调 ===
        {
            let calculator = self.calculator.clone();
            let settings = self.settings.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_copy_pressed(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::dispatch(&app_window, &calculator, &settings, Action::CopyResult);
                }
            });
        }

        // === 键盘输入回调 ===
        {
            let calculator = self.calculator.clone();
            let settings = self.settings.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_key_input(move |text, ctrl| {
                let Some(action) = action_for_key(text.as_str(), ctrl) else {
                    return false;
                };
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::dispatch(&app_window, &calculator, &settings, action);
                }
                true
            });
        }
    }

    /// 初始化UI状态
    fn initialize_ui(&self, app_window: &AppWindow) {
        app_window.set_window_title(self.settings.window_title.as_str().into());
        app_window.set_status_message(STATUS_READY.into());
        Self::refresh_display(app_window, &self.calculator.borrow());
    }

    /// 执行一个动作并刷新显示
    fn dispatch(
        app_window: &AppWindow,
        calculator: &Rc<RefCell<Calculator>>,
        settings: &Settings,
        action: Action,
    ) {
        if action == Action::CopyResult {
            Self::handle_copy(app_window, &calculator.borrow());
            return;
        }

        let result = action.apply(&mut calculator.borrow_mut());
        if tracing::enabled!(tracing::Level::DEBUG) {
            let snapshot =
                serde_json::to_string(&calculator.borrow().snapshot()).unwrap_or_default();
            tracing::debug!("动作 {:?} -> {:?}, 状态: {}", action, result, snapshot);
        }

        match result {
            Ok(Outcome::Computed(value)) => {
                tracing::info!("计算结果: {}", value);
                Self::pulse_display(app_window, settings.flash_duration_ms);
                app_window.set_status_message(STATUS_READY.into());
            }
            Ok(Outcome::Updated) => app_window.set_status_message(STATUS_READY.into()),
            Ok(Outcome::Unchanged) => {}
            Err(e) => Self::handle_calc_error(app_window, e),
        }

        Self::refresh_display(app_window, &calculator.borrow());
    }

    /// 根据快照刷新两行显示
    fn refresh_display(app_window: &AppWindow, calculator: &Calculator) {
        let lines = DisplayLines::from(&calculator.snapshot());
        app_window.set_previous_text(lines.previous.into());
        app_window.set_current_text(lines.current.into());
    }

    /// 结果闪烁效果，定时自动恢复
    fn pulse_display(app_window: &AppWindow, duration_ms: u64) {
        app_window.set_flash(true);
        let app_window_weak = app_window.as_weak();
        slint::Timer::single_shot(Duration::from_millis(duration_ms), move || {
            if let Some(app_window) = app_window_weak.upgrade() {
                app_window.set_flash(false);
            }
        });
    }

    /// 计算错误：状态栏提示并弹出警告框
    fn handle_calc_error(app_window: &AppWindow, error: CalcError) {
        tracing::warn!("计算失败: {}", error);
        app_window.set_status_message(format!("{}{}", STATUS_ERROR_PREFIX, error).into());

        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title(DIALOG_WARNING_TITLE)
            .set_description(error.to_string())
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }

    /// 复制当前值（原始数值，不含分组符）
    fn handle_copy(app_window: &AppWindow, calculator: &Calculator) {
        let value = calculator.current_operand();
        match copy_to_clipboard(value) {
            Ok(()) => {
                tracing::info!("已复制: {}", value);
                app_window.set_status_message(STATUS_COPIED.into());
            }
            Err(e) => {
                tracing::error!("复制失败: {}", e);
                app_window.set_status_message(format!("{}{}", STATUS_ERROR_PREFIX, e).into());
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let (settings, settings_error) = match Settings::load_from_env() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    // 初始化日志输出
    let _ = SubscriberBuilder::default()
        .with_max_level(settings.tracing_level())
        .try_init();

    if let Some(e) = settings_error {
        tracing::warn!("配置加载失败，使用默认配置: {}", e);
    }

    let app = AppWindow::new().context("UI 初始化失败")?;

    // 创建VM桥接器并绑定UI回调
    let bridge = ViewModelBridge::new(&app, settings);
    bridge.initialize_ui(&app);

    tracing::info!("应用启动成功，UI已初始化");
    app.run().context("事件循环异常退出")?;
    Ok(())
}
