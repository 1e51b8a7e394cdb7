//! Thin wrappers over the Accessibility C API.

use std::{cell::RefCell, collections::HashMap, ffi::c_void, ptr, thread_local};

use core_foundation::{
    array::{CFArray, CFArrayGetCount, CFArrayGetValueAtIndex},
    base::{CFRelease, CFTypeRef, TCFType},
    boolean::{kCFBooleanFalse, kCFBooleanTrue},
    string::{CFString, CFStringRef},
};
use objc2_foundation::{NSPoint, NSSize};

use crate::{Error, Result};

#[link(name = "ApplicationServices", kind = "framework")]
unsafe extern "C" {
    fn AXUIElementCreateApplication(pid: i32) -> *mut c_void;
    fn AXUIElementCopyAttributeValue(
        element: *mut c_void,
        attr: CFStringRef,
        value: *mut CFTypeRef,
    ) -> i32;
    fn AXUIElementSetAttributeValue(element: *mut c_void, attr: CFStringRef, value: CFTypeRef)
    -> i32;
    fn AXUIElementPerformAction(element: *mut c_void, action: CFStringRef) -> i32;
    fn AXValueCreate(the_type: i32, value_ptr: *const c_void) -> CFTypeRef;
}

#[link(name = "CoreFoundation", kind = "framework")]
unsafe extern "C" {
    fn CFBooleanGetValue(b: CFTypeRef) -> bool;
    fn CFRetain(cf: CFTypeRef) -> CFTypeRef;
}

/// `kAXValueCGPointType`.
const K_AX_VALUE_CGPOINT_TYPE: i32 = 1;
/// `kAXValueCGSizeType`.
const K_AX_VALUE_CGSIZE_TYPE: i32 = 2;
/// `kAXErrorInvalidUIElement`: the element no longer exists.
const K_AX_ERROR_INVALID_UI_ELEMENT: i32 = -25202;

thread_local! {
    static ATTR_STRINGS: RefCell<HashMap<&'static str, CFString>> = RefCell::new(HashMap::new());
}

/// Stable `CFStringRef` for an attribute or action name.
pub(super) fn cfstr(name: &'static str) -> CFStringRef {
    ATTR_STRINGS.with(|cell| {
        let mut m = cell.borrow_mut();
        let s = m.entry(name).or_insert_with(|| CFString::new(name));
        s.as_concrete_TypeRef()
    })
}

/// Fail fast when the process cannot use Accessibility.
pub(super) fn ax_check() -> Result<()> {
    if permissions::accessibility_ok() {
        Ok(())
    } else {
        Err(Error::Permission)
    }
}

/// Map a non-zero `AXError` for `op`.
fn ax_err(op: &'static str, code: i32) -> Error {
    if code == K_AX_ERROR_INVALID_UI_ELEMENT {
        Error::WindowGone
    } else {
        Error::AxCode { op, code }
    }
}

/// Owned, retained accessibility element. Released on drop.
pub(super) struct AxElem(*mut c_void);

impl AxElem {
    /// Take ownership of an element returned under the create rule.
    fn from_create(ptr: *mut c_void) -> Option<Self> {
        (!ptr.is_null()).then_some(Self(ptr))
    }

    /// Retain an element borrowed from a container.
    fn retain_from_borrowed(ptr: *mut c_void) -> Option<Self> {
        if ptr.is_null() {
            return None;
        }
        unsafe { CFRetain(ptr as CFTypeRef) };
        Some(Self(ptr))
    }

    /// Application element for `pid`.
    pub(super) fn application(pid: i32) -> Result<Self> {
        Self::from_create(unsafe { AXUIElementCreateApplication(pid) })
            .ok_or(Error::AppElement(pid))
    }

    /// Raw pointer for FFI calls.
    fn as_ptr(&self) -> *mut c_void {
        self.0
    }

    /// String attribute, if present.
    pub(super) fn string(&self, attr: &'static str) -> Option<String> {
        let mut v: CFTypeRef = ptr::null_mut();
        let err = unsafe { AXUIElementCopyAttributeValue(self.as_ptr(), cfstr(attr), &mut v) };
        if err != 0 || v.is_null() {
            return None;
        }
        let s = unsafe { CFString::wrap_under_create_rule(v as _) };
        Some(s.to_string())
    }

    /// Title, falling back to the description.
    pub(super) fn label(&self) -> String {
        self.string("AXTitle")
            .filter(|s| !s.is_empty())
            .or_else(|| self.string("AXDescription"))
            .unwrap_or_default()
    }

    /// Boolean attribute; `None` when unset.
    pub(super) fn bool(&self, attr: &'static str) -> Result<Option<bool>> {
        let mut v: CFTypeRef = ptr::null_mut();
        let err = unsafe { AXUIElementCopyAttributeValue(self.as_ptr(), cfstr(attr), &mut v) };
        if err != 0 {
            return Err(ax_err(attr, err));
        }
        if v.is_null() {
            return Ok(None);
        }
        let b = unsafe { CFBooleanGetValue(v) };
        unsafe { CFRelease(v) };
        Ok(Some(b))
    }

    /// Set a boolean attribute.
    pub(super) fn set_bool(&self, attr: &'static str, value: bool) -> Result<()> {
        let val = unsafe {
            (if value {
                kCFBooleanTrue
            } else {
                kCFBooleanFalse
            }) as CFTypeRef
        };
        let err = unsafe { AXUIElementSetAttributeValue(self.as_ptr(), cfstr(attr), val) };
        if err != 0 {
            return Err(ax_err(attr, err));
        }
        Ok(())
    }

    /// Set an `AXValue` attribute of the given type from a `repr(C)` value.
    fn set_value<T>(&self, attr: &'static str, ty: i32, value: &T) -> Result<()> {
        let v = unsafe { AXValueCreate(ty, value as *const T as *const c_void) };
        if v.is_null() {
            return Err(Error::AxCode { op: attr, code: 0 });
        }
        let err = unsafe { AXUIElementSetAttributeValue(self.as_ptr(), cfstr(attr), v) };
        unsafe { CFRelease(v) };
        if err != 0 {
            return Err(ax_err(attr, err));
        }
        Ok(())
    }

    /// Move the element (top-left coordinates).
    pub(super) fn set_position(&self, p: NSPoint) -> Result<()> {
        self.set_value("AXPosition", K_AX_VALUE_CGPOINT_TYPE, &p)
    }

    /// Resize the element.
    pub(super) fn set_size(&self, s: NSSize) -> Result<()> {
        self.set_value("AXSize", K_AX_VALUE_CGSIZE_TYPE, &s)
    }

    /// Perform an action such as `AXPress`.
    pub(super) fn perform(&self, action: &'static str) -> Result<()> {
        let err = unsafe { AXUIElementPerformAction(self.as_ptr(), cfstr(action)) };
        if err != 0 {
            return Err(ax_err(action, err));
        }
        Ok(())
    }

    /// Elements of an array-valued attribute, retained.
    pub(super) fn elements(&self, attr: &'static str) -> Result<Vec<Self>> {
        let mut v: CFTypeRef = ptr::null_mut();
        let err = unsafe { AXUIElementCopyAttributeValue(self.as_ptr(), cfstr(attr), &mut v) };
        if err != 0 {
            return Err(ax_err(attr, err));
        }
        if v.is_null() {
            return Ok(Vec::new());
        }
        let arr = unsafe { CFArray::<*const c_void>::wrap_under_create_rule(v as _) };
        let n = unsafe { CFArrayGetCount(arr.as_concrete_TypeRef()) };
        let mut out = Vec::with_capacity(n.max(0) as usize);
        for i in 0..n {
            let raw =
                unsafe { CFArrayGetValueAtIndex(arr.as_concrete_TypeRef(), i) } as *mut c_void;
            if let Some(e) = Self::retain_from_borrowed(raw) {
                out.push(e);
            }
        }
        Ok(out)
    }

    /// Top-level windows (`AXRole == AXWindow`) of an application element.
    pub(super) fn windows(&self) -> Result<Vec<Self>> {
        Ok(self
            .elements("AXWindows")?
            .into_iter()
            .filter(|w| w.string("AXRole").as_deref() == Some("AXWindow"))
            .collect())
    }

    /// Depth-first search of `AXChildren` for the first element matching `pred`.
    pub(super) fn find(&self, depth: usize, pred: &dyn Fn(&Self) -> bool) -> Option<Self> {
        if depth == 0 {
            return None;
        }
        for child in self.elements("AXChildren").ok()? {
            if pred(&child) {
                return Some(child);
            }
            if let Some(found) = child.find(depth - 1, pred) {
                return Some(found);
            }
        }
        None
    }
}

impl Drop for AxElem {
    fn drop(&mut self) {
        unsafe { CFRelease(self.0 as CFTypeRef) };
    }
}
