mod toolbar;

pub use toolbar::{
    ActionId, EditBuffer, MenuAction, MenuEntry, Target, Toolbar, ToolbarEffect, ToolbarEvent,
    ToolbarItem, ToolbarProps, ToolbarWidget, UNTITLED,
};
