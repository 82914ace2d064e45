// Localized UI strings
// English and Chinese tables; the win/loss messages are handed to the engine

#[derive(Clone)]
pub struct Assets {
    // Menu items
    pub menu_help: &'static str,
    pub menu_new: &'static str,
    pub menu_options: &'static str,
    pub menu_exit: &'static str,

    // Options modal
    pub opt_strict_flags: &'static str,
    pub opt_ascii_icons: &'static str,
    pub opt_language: &'static str,

    // Help modal
    pub help_controls: &'static str,
    pub help_move: &'static str,
    pub help_reveal: &'static str,
    pub help_flag: &'static str,
    pub help_new: &'static str,

    // Game-ended modal
    pub win_title: &'static str,
    pub win_message: &'static str,
    pub win_time_fmt: &'static str, // "Your time is: {}"
    pub loss_title: &'static str,
    pub loss_message: &'static str,

    // Status bar
    pub status_fmt: &'static str, // " Mines: {}   Time: {} "

    // Buttons
    pub btn_ok: &'static str,
    pub btn_close: &'static str,

    // Terminal size messages
    pub tsmsg_title: &'static str,
    pub tsmsg_line1: &'static str,
    pub tsmsg_line2: &'static str, // "Minimum size required: {} x {}"

    // Name of this language in the options modal
    pub lang_name: &'static str,
}

pub fn english_assets() -> Assets {
    Assets {
        menu_help: "Help",
        menu_new: "New",
        menu_options: "Options",
        menu_exit: "Exit",

        opt_strict_flags: "Flags block reveal",
        opt_ascii_icons: "ASCII icons",
        opt_language: "Language",

        help_controls: " Controls:",
        help_move: "  Mouse | Arrows  - move cursor",
        help_reveal: "  L-Click | Space - reveal",
        help_flag: "  R-Click | F     - toggle flag",
        help_new: "  F2              - new game",

        win_title: "Success",
        win_message: "Congratulations! You win!",
        win_time_fmt: "Your time is: {}",
        loss_title: "Failure",
        loss_message: "Bad luck! You lose!",

        status_fmt: " Mines: {}   Time: {} ",

        btn_ok: " OK ",
        btn_close: " CLOSE ",

        tsmsg_title: "Resize Terminal",
        tsmsg_line1: "Terminal layout too small",
        tsmsg_line2: "Minimum size required: {} x {}",

        lang_name: "English",
    }
}

pub fn chinese_assets() -> Assets {
    Assets {
        menu_help: "帮助",
        menu_new: "新游戏",
        menu_options: "选项",
        menu_exit: "退出",

        opt_strict_flags: "旗标阻止翻开",
        opt_ascii_icons: "ASCII 图标",
        opt_language: "语言",

        help_controls: " 操作：",
        help_move: "  鼠标 | 方向键   - 移动光标",
        help_reveal: "  左键 | 空格     - 翻开",
        help_flag: "  右键 | F        - 标记旗标",
        help_new: "  F2              - 新游戏",

        win_title: "成功",
        win_message: "恭喜！你赢了！",
        win_time_fmt: "你的用时：{}",
        loss_title: "失败",
        loss_message: "运气不好！你输了！",

        status_fmt: " 地雷：{}   时间：{} ",

        btn_ok: " 确定 ",
        btn_close: " 关闭 ",

        tsmsg_title: "需要调整大小",
        tsmsg_line1: "终端屏幕布局过小",
        tsmsg_line2: "最小需要尺寸：{} x {}",

        lang_name: "中文",
    }
}

/// Current language code and its string table
pub struct Lang {
    pub current_lang: String,
    pub assets: Assets,
}

impl Lang {
    /// "zh", "zh-CN", "zh_TW" select Chinese; anything else is English
    pub fn new(lang_code: &str) -> Self {
        let code = normalize(lang_code);
        Lang {
            current_lang: code.to_string(),
            assets: assets_for(code),
        }
    }

    pub fn switch_to(&mut self, lang_code: &str) {
        let code = normalize(lang_code);
        self.current_lang = code.to_string();
        self.assets = assets_for(code);
    }

    /// Code of the other supported language, used by the options toggle
    pub fn next_code(&self) -> &'static str {
        if self.current_lang == "zh" { "en" } else { "zh" }
    }
}

fn normalize(lang_code: &str) -> &'static str {
    if lang_code.to_lowercase().starts_with("zh") {
        "zh"
    } else {
        "en"
    }
}

fn assets_for(code: &str) -> Assets {
    if code == "zh" {
        chinese_assets()
    } else {
        english_assets()
    }
}

/// Substitute each `{}` in a template with the next argument
pub fn fill(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut args = args.iter();
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        out.push_str(args.next().copied().unwrap_or(""));
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}
